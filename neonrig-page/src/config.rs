//! Selectors, labels and timings for the page glue

use serde::{Deserialize, Serialize};

/// Page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Links whose clicks scroll smoothly instead of jumping
    #[serde(default = "default_anchor_selector")]
    pub anchor_selector: String,

    /// Reveal-on-scroll
    #[serde(default)]
    pub reveal: RevealConfig,

    /// Element whose content is doubled for a seamless ticker loop
    #[serde(default = "default_marquee_selector")]
    pub marquee_selector: String,

    /// Contact form
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Reveal-on-scroll settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Elements hidden until they scroll into view
    #[serde(default = "default_reveal_selectors")]
    pub selectors: Vec<String>,

    /// Fraction of the element that must be visible
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Observer root margin, CSS syntax
    #[serde(default = "default_root_margin")]
    pub root_margin: String,

    /// Class added once an element is revealed
    #[serde(default = "default_visible_class")]
    pub visible_class: String,
}

/// Contact form settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// The form to intercept
    #[serde(default = "default_form_selector")]
    pub form_selector: String,

    /// Submit button, looked up inside the form
    #[serde(default = "default_button_selector")]
    pub button_selector: String,

    /// URL the form is posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Button label while the request is in flight
    #[serde(default = "default_pending_text")]
    pub pending_text: String,

    /// Button label after a 2xx response
    #[serde(default = "default_success_text")]
    pub success_text: String,

    /// Button label after any other outcome
    #[serde(default = "default_error_text")]
    pub error_text: String,

    /// Button background while pending
    #[serde(default = "default_pending_color")]
    pub pending_color: String,

    /// Button background after success
    #[serde(default = "default_success_color")]
    pub success_color: String,

    /// Button background after failure
    #[serde(default = "default_error_color")]
    pub error_color: String,

    /// How long the success or error look stays before reverting
    #[serde(default = "default_revert_delay_ms")]
    pub revert_delay_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            anchor_selector: default_anchor_selector(),
            reveal: RevealConfig::default(),
            marquee_selector: default_marquee_selector(),
            contact: ContactConfig::default(),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: default_reveal_selectors(),
            threshold: default_threshold(),
            root_margin: default_root_margin(),
            visible_class: default_visible_class(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_selector: default_form_selector(),
            button_selector: default_button_selector(),
            endpoint: default_endpoint(),
            pending_text: default_pending_text(),
            success_text: default_success_text(),
            error_text: default_error_text(),
            pending_color: default_pending_color(),
            success_color: default_success_color(),
            error_color: default_error_color(),
            revert_delay_ms: default_revert_delay_ms(),
        }
    }
}

impl RevealConfig {
    /// All reveal selectors as one selector group
    pub fn selector_group(&self) -> String {
        self.selectors.join(", ")
    }
}

fn default_anchor_selector() -> String { "a[href^=\"#\"]".to_string() }
fn default_marquee_selector() -> String { ".marquee-track".to_string() }

fn default_reveal_selectors() -> Vec<String> {
    [
        ".service-card",
        ".hero-title",
        ".section-heading",
        ".section-text",
        ".gallery-item",
        ".contact-container",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_threshold() -> f64 { 0.1 }
fn default_root_margin() -> String { "0px 0px -50px 0px".to_string() }
fn default_visible_class() -> String { "visible".to_string() }

fn default_form_selector() -> String { ".contact-form".to_string() }
fn default_button_selector() -> String { ".submit-btn".to_string() }
fn default_endpoint() -> String { "/api/contact".to_string() }
fn default_pending_text() -> String { "TRANSMITTING...".to_string() }
fn default_success_text() -> String { "SEQUENCE COMPLETE".to_string() }
fn default_error_text() -> String { "ERROR".to_string() }
fn default_pending_color() -> String { "#00f0ff".to_string() }
fn default_success_color() -> String { "#00ff00".to_string() }
fn default_error_color() -> String { "#ff2a2a".to_string() }
fn default_revert_delay_ms() -> u32 { 3000 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_group_joins_all() {
        let reveal = RevealConfig::default();
        assert_eq!(
            reveal.selector_group(),
            ".service-card, .hero-title, .section-heading, .section-text, .gallery-item, .contact-container"
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: PageConfig =
            serde_json::from_str(r#"{"contact": {"endpoint": "https://example.test/submit"}}"#).unwrap();
        assert_eq!(config.contact.endpoint, "https://example.test/submit");
        assert_eq!(config.contact.revert_delay_ms, 3000);
        assert_eq!(config.reveal, RevealConfig::default());
        assert_eq!(config.anchor_selector, "a[href^=\"#\"]");
    }
}
