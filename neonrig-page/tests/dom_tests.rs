/// Browser tests for the DOM adapter
#[cfg(target_arch = "wasm32")]
mod dom_tests {
    use neonrig_page::config::RevealConfig;
    use neonrig_page::dom;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Document, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn add(tag: &str, class: &str, html: &str) -> HtmlElement {
        let document = document();
        let element = document.create_element(tag).unwrap().dyn_into::<HtmlElement>().unwrap();
        element.set_class_name(class);
        element.set_inner_html(html);
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    #[wasm_bindgen_test]
    fn test_marquee_doubles_track() {
        let track = add("div", "marquee-track-test", "<span>RTX 5090</span>");
        let before = track.inner_html().len();

        assert!(dom::install_marquee(&document(), ".marquee-track-test").unwrap());

        assert_eq!(track.inner_html().len(), before * 2);
    }

    #[wasm_bindgen_test]
    fn test_missing_marquee_is_skipped() {
        assert!(!dom::install_marquee(&document(), ".no-such-track").unwrap());
    }

    #[wasm_bindgen_test]
    fn test_reveal_targets_start_hidden() {
        let card = add("div", "reveal-card-test", "card");
        let config = RevealConfig {
            selectors: vec![".reveal-card-test".to_string()],
            ..Default::default()
        };

        assert_eq!(dom::install_reveal(&document(), &config).unwrap(), 1);

        let style = card.style();
        assert_eq!(style.get_property_value("opacity").unwrap(), "0");
        assert_eq!(style.get_property_value("transform").unwrap(), "translateY(30px)");
    }

    #[wasm_bindgen_test]
    fn test_anchor_listeners_counted() {
        add("a", "nav-test", "");
        let links = document().query_selector_all("a.nav-test").unwrap();
        for i in 0..links.length() {
            links
                .item(i)
                .unwrap()
                .dyn_into::<web_sys::Element>()
                .unwrap()
                .set_attribute("href", "#services")
                .unwrap();
        }

        assert_eq!(dom::install_smooth_scroll(&document(), "a.nav-test").unwrap(), 1);
    }
}
