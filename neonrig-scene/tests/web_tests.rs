/// Browser tests for mounting the scene
#[cfg(target_arch = "wasm32")]
mod web_tests {
    use neonrig_scene::config::SceneConfig;
    use neonrig_scene::web;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn add_container(id: &str) -> HtmlElement {
        let document = web::document().unwrap();
        let container = document
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        container.set_id(id);
        container.style().set_property("width", "320px").unwrap();
        container.style().set_property("height", "240px").unwrap();
        document.body().unwrap().append_child(&container).unwrap();
        container
    }

    #[wasm_bindgen_test]
    fn test_missing_container_is_not_an_error() {
        let config = SceneConfig {
            container_id: "no-such-container".to_string(),
            ..Default::default()
        };
        assert!(web::mount(&config).unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_mount_appends_sized_canvas() {
        let container = add_container("pc-container-test");
        let config = SceneConfig {
            container_id: "pc-container-test".to_string(),
            ..Default::default()
        };

        let mounted = web::mount(&config).unwrap().expect("container exists");

        let canvas = mounted.canvas();
        assert_eq!(container.child_element_count(), 1);
        let ratio = web::window().unwrap().device_pixel_ratio();
        assert_eq!(canvas.width(), (320.0 * ratio).round() as u32);
        assert_eq!(canvas.height(), (240.0 * ratio).round() as u32);
    }
}
