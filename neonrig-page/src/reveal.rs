//! Reveal-on-scroll bookkeeping

/// Inline styles that keep an element hidden until it scrolls into view
pub const HIDDEN_STYLES: [(&str, &str); 3] = [
    ("opacity", "0"),
    ("transform", "translateY(30px)"),
    ("transition", "all 0.8s cubic-bezier(0.2, 1, 0.3, 1)"),
];

/// Inline properties removed on reveal; the transition stays so the change animates
pub const REVEAL_CLEARS: [&str; 2] = ["opacity", "transform"];

/// Attribute carrying an element's slot in the tracker
pub const INDEX_ATTRIBUTE: &str = "data-reveal-index";

/// Which observed elements have been revealed. Reveal is one-way.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    /// Track `count` hidden elements
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    /// Record an intersection report. Returns true only the first time element
    /// `index` is seen intersecting.
    pub fn on_intersection(&mut self, index: usize, is_intersecting: bool) -> bool {
        match self.revealed.get_mut(index) {
            Some(revealed) if is_intersecting && !*revealed => {
                *revealed = true;
                true
            }
            _ => false,
        }
    }

    /// Whether element `index` has been revealed
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Number of revealed elements
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_fires_once() {
        let mut tracker = RevealTracker::new(2);
        assert!(tracker.on_intersection(1, true));
        assert!(!tracker.on_intersection(1, true));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let mut tracker = RevealTracker::new(1);
        tracker.on_intersection(0, true);
        assert!(!tracker.on_intersection(0, false));
        assert!(tracker.is_revealed(0));
    }

    #[test]
    fn test_non_intersecting_reports_ignored() {
        let mut tracker = RevealTracker::new(3);
        assert!(!tracker.on_intersection(2, false));
        assert!(!tracker.on_intersection(7, true));
        assert_eq!(tracker.revealed_count(), 0);
    }
}
