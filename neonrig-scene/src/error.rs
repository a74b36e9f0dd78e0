//! Error types for scene construction and the browser mount

/// Errors raised while building or mounting the scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The host element for the canvas is not in the document
    #[error("Scene container '#{0}' not found")]
    ContainerMissing(String),

    /// A node was attached to a parent index that does not exist yet
    #[error("Parent node {0} does not exist")]
    MissingParent(usize),

    /// WebGL context, shader or buffer failure
    #[error("Graphics error: {0}")]
    Graphics(String),

    /// Any other DOM API failure
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result alias for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SceneError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SceneError::Dom(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SceneError> for wasm_bindgen::JsValue {
    fn from(err: SceneError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
