//! Directory listing entries as delivered by the repository contents API.

use serde::{Deserialize, Serialize};

use crate::config::DOCUMENT_FILE_NAME;

/// Kind of a listed entry.
///
/// The API reports `"dir"` for directories; everything else (`"file"`,
/// `"symlink"`, `"submodule"`) is treated as a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[serde(rename = "dir")]
    Directory,
    #[serde(other)]
    File,
}

/// A single entry of a directory listing.
///
/// Identified by `path`, which is relative to the repository root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// File or directory name (last path segment)
    pub name: String,
    /// Full path relative to the repository root
    pub path: String,
    /// Directory or file
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Direct download URL (files only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl DirectoryEntry {
    pub fn directory(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryKind::Directory,
            download_url: None,
        }
    }

    pub fn file(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryKind::File,
            download_url: None,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Whether this entry is a browsable document (`README.md`, any case).
    pub fn is_document(&self) -> bool {
        self.kind == EntryKind::File && self.name.eq_ignore_ascii_case(DOCUMENT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_contents_listing() {
        let json = r#"[
            {"name": "pwn", "path": "writeups/pwn", "type": "dir", "download_url": null},
            {"name": "README.md", "path": "writeups/README.md", "type": "file",
             "download_url": "https://raw.githubusercontent.com/u/r/main/writeups/README.md"},
            {"name": "link", "path": "writeups/link", "type": "symlink"}
        ]"#;
        let entries: Vec<DirectoryEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[0].download_url, None);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert!(entries[1].download_url.is_some());
        assert_eq!(entries[2].kind, EntryKind::File);
    }

    #[test]
    fn test_document_detection() {
        assert!(DirectoryEntry::file("README.md", "a/README.md").is_document());
        assert!(DirectoryEntry::file("readme.MD", "a/readme.MD").is_document());
        assert!(!DirectoryEntry::file("README.txt", "a/README.txt").is_document());
        assert!(!DirectoryEntry::file("notes.md", "a/notes.md").is_document());
        assert!(!DirectoryEntry::directory("README.md", "a/README.md").is_document());
    }
}
