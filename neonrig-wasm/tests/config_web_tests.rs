/// Browser tests for reading the inline configuration element
#[cfg(target_arch = "wasm32")]
mod config_web_tests {
    use neonrig_wasm::config::{load_from_document, SiteConfig, CONFIG_ELEMENT_ID};
    use wasm_bindgen_test::*;
    use web_sys::Document;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn clear_config(document: &Document) {
        while let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) {
            element.remove();
        }
    }

    #[wasm_bindgen_test]
    fn test_config_element_overrides_defaults() {
        let document = document();
        clear_config(&document);

        let script = document.create_element("script").unwrap();
        script.set_id(CONFIG_ELEMENT_ID);
        script.set_attribute("type", "application/json").unwrap();
        script.set_text_content(Some(
            r#"{"scene":{"container_id":"rig-stage"},"page":{"contact":{"revert_delay_ms":1500}}}"#,
        ));
        document.body().unwrap().append_child(&script).unwrap();

        let config = load_from_document(&document);
        clear_config(&document);

        assert_eq!(config.scene.container_id, "rig-stage");
        assert_eq!(config.page.contact.revert_delay_ms, 1500);
        assert_eq!(config.page.contact.endpoint, SiteConfig::default().page.contact.endpoint);
    }

    #[wasm_bindgen_test]
    fn test_missing_config_element_means_defaults() {
        let document = document();
        clear_config(&document);

        assert_eq!(load_from_document(&document), SiteConfig::default());
    }

    #[wasm_bindgen_test]
    fn test_broken_config_element_means_defaults() {
        let document = document();
        clear_config(&document);

        let script = document.create_element("script").unwrap();
        script.set_id(CONFIG_ELEMENT_ID);
        script.set_attribute("type", "application/json").unwrap();
        script.set_text_content(Some(r#"{"scene": {"motion": {"damping": 0}}}"#));
        document.body().unwrap().append_child(&script).unwrap();

        let config = load_from_document(&document);
        clear_config(&document);

        assert_eq!(config, SiteConfig::default());
    }
}
