//! Display ordering for directory listings.

use std::collections::HashMap;

use crate::models::{DirectoryEntry, OrderSpec};

/// Sort key for names absent from the manual order list.
const UNLISTED: usize = usize::MAX;

/// Order the entries of the directory at `path` for display.
///
/// Directories come before files. Within each group, names listed in
/// `spec` for this directory come first in list order; the rest follow in
/// case-sensitive lexicographic order.
pub fn order(path: &str, entries: &[DirectoryEntry], spec: &OrderSpec) -> Vec<DirectoryEntry> {
    let rank: HashMap<&str, usize> = spec
        .names_for(path)
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        let ra = rank.get(a.name.as_str()).copied().unwrap_or(UNLISTED);
        let rb = rank.get(b.name.as_str()).copied().unwrap_or(UNLISTED);

        b.is_dir()
            .cmp(&a.is_dir())
            .then(ra.cmp(&rb))
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn spec(path: &str, listed: &[&str]) -> OrderSpec {
        let mut spec = OrderSpec::default();
        spec.order
            .insert(path.to_string(), listed.iter().map(|s| s.to_string()).collect());
        spec
    }

    #[test]
    fn test_listed_names_first_then_lexicographic() {
        let entries = vec![
            DirectoryEntry::directory("a", "w/a"),
            DirectoryEntry::directory("c", "w/c"),
            DirectoryEntry::directory("b", "w/b"),
        ];
        let sorted = order("w", &entries, &spec("w", &["b", "a"]));
        assert_eq!(names(&sorted), ["b", "a", "c"]);
    }

    #[test]
    fn test_directories_before_files() {
        let entries = vec![
            DirectoryEntry::file("README.md", "w/README.md"),
            DirectoryEntry::directory("zeta", "w/zeta"),
            DirectoryEntry::directory("alpha", "w/alpha"),
        ];
        // Even a listed file stays behind unlisted directories
        let sorted = order("w", &entries, &spec("w", &["README.md"]));
        assert_eq!(names(&sorted), ["alpha", "zeta", "README.md"]);
    }

    #[test]
    fn test_lexicographic_is_case_sensitive() {
        let entries = vec![
            DirectoryEntry::directory("beta", "w/beta"),
            DirectoryEntry::directory("Gamma", "w/Gamma"),
            DirectoryEntry::directory("alpha", "w/alpha"),
        ];
        let sorted = order("w", &entries, &OrderSpec::default());
        assert_eq!(names(&sorted), ["Gamma", "alpha", "beta"]);
    }

    #[test]
    fn test_order_only_applies_to_its_directory() {
        let entries = vec![
            DirectoryEntry::directory("a", "other/a"),
            DirectoryEntry::directory("b", "other/b"),
        ];
        let sorted = order("other", &entries, &spec("w", &["b"]));
        assert_eq!(names(&sorted), ["a", "b"]);
    }

    #[test]
    fn test_unknown_listed_names_are_harmless() {
        let entries = vec![
            DirectoryEntry::directory("x", "w/x"),
            DirectoryEntry::directory("y", "w/y"),
        ];
        let sorted = order("w", &entries, &spec("w", &["missing", "y"]));
        assert_eq!(names(&sorted), ["y", "x"]);
    }
}
