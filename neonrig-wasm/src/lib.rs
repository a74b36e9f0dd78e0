//! NeonRig WASM entry point
//!
//! Installs the panic hook and console logger, reads the site configuration, then mounts
//! the 3D scene and attaches the page behaviours. A failure in one never stops the other.

pub mod config;

pub use config::{config_or_default, parse_config, SiteConfig};

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use neonrig_scene::web::MountedScene;
    use wasm_bindgen::prelude::*;

    use crate::config;

    thread_local! {
        static SCENE: RefCell<Option<MountedScene>> = RefCell::new(None);
    }

    // Set up panic hook for better error messages
    pub fn set_panic_hook() {
        console_error_panic_hook::set_once();
    }

    /// Initialize WASM module
    #[wasm_bindgen(start)]
    pub fn init() -> Result<(), JsValue> {
        set_panic_hook();
        if console_log::init_with_level(log::Level::Info).is_err() {
            // A logger is already installed
            log::debug!("console logger already initialised");
        }

        let document = neonrig_scene::web::document()?;
        let site = config::load_from_document(&document);

        match neonrig_scene::web::mount(&site.scene) {
            Ok(mounted) => SCENE.with(|scene| *scene.borrow_mut() = mounted),
            Err(e) => log::error!("3D scene failed to start: {}", e),
        }

        if let Err(e) = neonrig_page::dom::install(&site.page) {
            log::error!("Page glue failed to install: {}", e);
        }

        Ok(())
    }

    /// Frames the scene has drawn, 0 when it is not mounted
    #[wasm_bindgen(js_name = framesRendered)]
    pub fn frames_rendered() -> f64 {
        SCENE.with(|scene| scene.borrow().as_ref().map(|s| s.frames() as f64).unwrap_or(0.0))
    }
}

#[cfg(target_arch = "wasm32")]
pub use entry::{frames_rendered, init};
