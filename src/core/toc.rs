//! Table of contents: heading ids and scroll-spy selection.

use crate::config::toc::{FALLBACK_ID, MAX_ID_LEN};

/// Derive an element id from heading text.
///
/// Lowercases, joins whitespace runs with `-`, drops everything outside
/// `[A-Za-z0-9_-]` and truncates. Distinct headings may collide; no suffix
/// is added.
pub fn heading_id(text: &str) -> String {
    let id: String = text
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_ID_LEN)
        .collect();

    if id.is_empty() {
        FALLBACK_ID.to_string()
    } else {
        id
    }
}

/// A heading's intersection report from the scroll observer.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadingVisibility {
    pub id: String,
    /// Inside the observer's band
    pub intersecting: bool,
    /// Distance from the viewport top, in pixels
    pub top: f64,
}

/// Pick the heading to highlight from one batch of observer entries.
///
/// The top-most intersecting heading wins; `None` keeps the current one.
pub fn active_heading(entries: &[HeadingVisibility]) -> Option<&str> {
    entries
        .iter()
        .filter(|e| e.intersecting)
        .min_by(|a, b| a.top.total_cmp(&b.top))
        .map(|e| e.id.as_str())
}

/// The TOC meta line: the path from the `writeups/` segment on, if present.
pub fn display_path(path: &str) -> &str {
    use crate::config::DOCUMENT_META_ANCHOR;

    path.find(DOCUMENT_META_ANCHOR)
        .map(|i| &path[i..])
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_id_examples() {
        assert_eq!(heading_id("Step 1: Setup!!"), "step-1-setup");
        assert_eq!(heading_id("Intro"), "intro");
        assert_eq!(heading_id("  Heap   Exploitation \t 101 "), "heap-exploitation-101");
        assert_eq!(heading_id("snake_case-ok"), "snake_case-ok");
    }

    #[test]
    fn test_heading_id_fallback() {
        assert_eq!(heading_id("!!!"), "section");
        assert_eq!(heading_id(""), "section");
        assert_eq!(heading_id("解法"), "section");
    }

    #[test]
    fn test_heading_id_truncates() {
        let long = "a".repeat(200);
        assert_eq!(heading_id(&long).len(), MAX_ID_LEN);
    }

    #[test]
    fn test_heading_id_collisions_are_kept() {
        assert_eq!(heading_id("Flag"), heading_id("flag!"));
    }

    #[test]
    fn test_active_heading_prefers_topmost_intersecting() {
        let entries = vec![
            HeadingVisibility { id: "b".into(), intersecting: true, top: 240.0 },
            HeadingVisibility { id: "a".into(), intersecting: false, top: 10.0 },
            HeadingVisibility { id: "c".into(), intersecting: true, top: 180.5 },
        ];
        assert_eq!(active_heading(&entries), Some("c"));
    }

    #[test]
    fn test_active_heading_none_visible() {
        let entries = vec![HeadingVisibility { id: "a".into(), intersecting: false, top: 0.0 }];
        assert_eq!(active_heading(&entries), None);
        assert_eq!(active_heading(&[]), None);
    }

    #[test]
    fn test_display_path() {
        assert_eq!(
            display_path("archive/writeups/pwn/README.md"),
            "writeups/pwn/README.md"
        );
        assert_eq!(display_path("docs/README.md"), "docs/README.md");
    }
}
