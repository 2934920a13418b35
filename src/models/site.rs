//! Site-level documents loaded once at startup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{GITHUB_API_BASE, GITHUB_RAW_BASE, GITHUB_WEB_BASE};
use crate::core::error::ConfigLoadError;

/// Site configuration from `data/config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Repository owner
    pub user: String,
    /// Repository name
    pub repo: String,
    /// Branch (or any git ref) to browse
    pub branch: String,
    /// Directory treated as the root of the document tree
    pub content_dir: String,
}

impl SiteConfig {
    /// Reject configurations that cannot address a repository.
    pub fn validate(self) -> Result<Self, ConfigLoadError> {
        if self.user.trim().is_empty() {
            return Err(ConfigLoadError::MissingField("user"));
        }
        if self.repo.trim().is_empty() {
            return Err(ConfigLoadError::MissingField("repo"));
        }
        if self.branch.trim().is_empty() {
            return Err(ConfigLoadError::MissingField("branch"));
        }
        Ok(self)
    }

    /// Contents API URL listing `path`.
    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            GITHUB_API_BASE, self.user, self.repo, path, self.branch
        )
    }

    /// Raw download URL for `path`, each segment percent-encoded.
    pub fn raw_url(&self, path: &str) -> String {
        let encoded = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/{}/{}/{}/{}",
            GITHUB_RAW_BASE, self.user, self.repo, self.branch, encoded
        )
    }

    /// Repository home page.
    pub fn repo_url(&self) -> String {
        format!("{}/{}/{}", GITHUB_WEB_BASE, self.user, self.repo)
    }
}

/// Manual ordering from `data/order.json`.
///
/// Maps a directory path to the names that should appear first, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    #[serde(default)]
    pub order: HashMap<String, Vec<String>>,
}

impl OrderSpec {
    /// Parse an order document; anything malformed yields an empty spec.
    pub fn parse_lenient(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    /// Listed names for a directory, if any.
    pub fn names_for(&self, path: &str) -> &[String] {
        self.order.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}
