//! Embedded content tag expansion
//!
//! Lesson bodies may embed host-application content tags. Expansion rewrites
//! them into plain HTML; it is applied per request when the `expand_tags`
//! flag is set, otherwise bodies are returned as authored.

use once_cell::sync::Lazy;
use regex::Regex;

static VIDEO_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<content-video\s+id="([A-Za-z0-9_-]+)"\s*/?>"#).unwrap()
});

static ACTIVITY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<content-activity\s+id="([A-Za-z0-9_-]+)"\s*/?>"#).unwrap()
});

/// Rewrite known embedded tags; unknown markup passes through untouched.
pub fn expand_tags(body: &str) -> String {
    let expanded = VIDEO_TAG.replace_all(body, |caps: &regex::Captures<'_>| {
        format!(
            "<iframe class=\"lesson-video\" src=\"https://www.youtube-nocookie.com/embed/{}\" allowfullscreen></iframe>",
            &caps[1]
        )
    });
    ACTIVITY_TAG
        .replace_all(&expanded, |caps: &regex::Captures<'_>| {
            format!(
                "<div class=\"lesson-activity\" data-activity-id=\"{}\"></div>",
                &caps[1]
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_video_tags() {
        let body = r#"<p>Watch:</p><content-video id="dQw4w9WgXcQ"/>"#;
        let out = expand_tags(body);
        assert!(out.contains("youtube-nocookie.com/embed/dQw4w9WgXcQ"));
        assert!(!out.contains("<content-video"));
        assert!(out.starts_with("<p>Watch:</p>"));
    }

    #[test]
    fn expands_activity_tags() {
        let out = expand_tags(r#"<content-activity id="quiz-1">"#);
        assert_eq!(
            out,
            r#"<div class="lesson-activity" data-activity-id="quiz-1"></div>"#
        );
    }

    #[test]
    fn unknown_markup_is_untouched() {
        let body = r#"<p>plain</p><content-unknown id="x"/>"#;
        assert_eq!(expand_tags(body), body);
    }
}
