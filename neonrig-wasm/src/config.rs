//! Site configuration, read from an inline JSON script element

use anyhow::{ensure, Context, Result};
use neonrig_page::PageConfig;
use neonrig_scene::SceneConfig;
use serde::{Deserialize, Serialize};

/// Id of the `<script type="application/json">` element holding overrides
pub const CONFIG_ELEMENT_ID: &str = "neonrig-config";

/// Everything the site can be tuned with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// The 3D rig
    #[serde(default)]
    pub scene: SceneConfig,

    /// Page interactions
    #[serde(default)]
    pub page: PageConfig,
}

impl SiteConfig {
    /// Reject values that would break the animation or the observers
    pub fn validate(&self) -> Result<()> {
        let motion = &self.scene.motion;
        ensure!(
            motion.damping > 0.0 && motion.damping <= 1.0,
            "scene.motion.damping must be in (0, 1], got {}",
            motion.damping
        );
        ensure!(
            self.scene.camera.fov_degrees > 0.0 && self.scene.camera.fov_degrees < 180.0,
            "scene.camera.fov_degrees must be in (0, 180), got {}",
            self.scene.camera.fov_degrees
        );
        ensure!(
            (0.0..=1.0).contains(&self.page.reveal.threshold),
            "page.reveal.threshold must be in [0, 1], got {}",
            self.page.reveal.threshold
        );
        ensure!(!self.scene.container_id.is_empty(), "scene.container_id must not be empty");
        Ok(())
    }
}

/// Parse and validate a JSON configuration
pub fn parse_config(text: &str) -> Result<SiteConfig> {
    let config: SiteConfig = serde_json::from_str(text).context("Invalid site configuration JSON")?;
    config.validate().context("Invalid site configuration")?;
    Ok(config)
}

/// Configuration from optional inline text; missing or broken config falls back to defaults
pub fn config_or_default(text: Option<&str>) -> SiteConfig {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        log::debug!("No site configuration found, using defaults");
        return SiteConfig::default();
    };

    parse_config(text).unwrap_or_else(|e| {
        log::warn!("{:#}; using defaults", e);
        SiteConfig::default()
    })
}

/// Read `#neonrig-config` from the document
#[cfg(target_arch = "wasm32")]
pub fn load_from_document(document: &web_sys::Document) -> SiteConfig {
    let text = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    config_or_default(text.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_blank_text_means_defaults() {
        assert_eq!(config_or_default(Some("   ")), SiteConfig::default());
        assert_eq!(config_or_default(None), SiteConfig::default());
    }
}
