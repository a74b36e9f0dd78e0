//! Seamless ticker loop

/// Content for a track that scrolls by half its width and wraps without a seam
pub fn loop_track(content: &str) -> String {
    let mut looped = String::with_capacity(content.len() * 2);
    looped.push_str(content);
    looped.push_str(content);
    looped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_is_doubled() {
        let content = "<span>RTX</span><span>DDR5</span>";
        let looped = loop_track(content);
        assert_eq!(looped.len(), content.len() * 2);
        assert!(looped.starts_with(content) && looped.ends_with(content));
    }

    #[test]
    fn test_empty_track_stays_empty() {
        assert_eq!(loop_track(""), "");
    }
}
