//! Error types for the page glue

/// Errors raised while wiring or running page interactions
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The form payload could not be encoded
    #[error("Failed to encode form payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A DOM call failed
    #[error("DOM error: {0}")]
    Dom(String),

    /// The request could not be built or sent
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result alias for page operations
pub type Result<T> = std::result::Result<T, PageError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PageError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PageError::Dom(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PageError> for wasm_bindgen::JsValue {
    fn from(err: PageError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
