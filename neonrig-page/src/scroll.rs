//! In-page anchor navigation

/// What a click on an in-page link should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorAction {
    /// Not an in-page link; let the browser handle it
    Ignore,
    /// Bare `#`: swallow the jump to the top
    PreventOnly,
    /// Smooth-scroll to the element matching this selector
    ScrollTo(String),
}

/// Decide how to handle a click on a link with this `href`
pub fn anchor_action(href: &str) -> AnchorAction {
    let href = href.trim();
    match href.strip_prefix('#') {
        None => AnchorAction::Ignore,
        Some("") => AnchorAction::PreventOnly,
        Some(_) => AnchorAction::ScrollTo(href.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_scrolls() {
        assert_eq!(anchor_action("#services"), AnchorAction::ScrollTo("#services".to_string()));
    }

    #[test]
    fn test_bare_hash_only_prevents() {
        assert_eq!(anchor_action("#"), AnchorAction::PreventOnly);
        assert_eq!(anchor_action(" # "), AnchorAction::PreventOnly);
    }

    #[test]
    fn test_external_links_ignored() {
        assert_eq!(anchor_action("https://example.test/#top"), AnchorAction::Ignore);
        assert_eq!(anchor_action("/about"), AnchorAction::Ignore);
    }
}
