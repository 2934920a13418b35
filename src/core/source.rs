//! Remote content access.
//!
//! [`ContentSource`] is the seam between the tree/document logic and the
//! network. [`GitHubSource`] talks to the GitHub contents API and the raw
//! content host; tests substitute an in-memory source.

use leptos::logging::{log, warn};

use crate::config::{ORDER_URL, SITE_CONFIG_URL};
use crate::core::error::{ConfigLoadError, FetchError};
use crate::models::{DirectoryEntry, OrderSpec, SiteConfig};
use crate::utils::fetch::{CacheMode, fetch_json, fetch_text};

/// Read-only access to a repository's directories and files.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    /// List a directory, in the order the remote delivers entries.
    async fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>, FetchError>;

    /// Fetch the raw text of a file, bypassing any HTTP cache.
    async fn fetch_document(&self, path: &str) -> Result<String, FetchError>;
}

/// GitHub-backed content source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitHubSource {
    config: SiteConfig,
}

impl GitHubSource {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }
}

impl ContentSource for GitHubSource {
    async fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>, FetchError> {
        fetch_json(&self.config.contents_url(path), CacheMode::ForceCache).await
    }

    async fn fetch_document(&self, path: &str) -> Result<String, FetchError> {
        fetch_text(&self.config.raw_url(path), CacheMode::NoCache).await
    }
}

// ============================================================================
// Site Documents
// ============================================================================

/// Load and validate the site configuration. Any failure is fatal.
pub async fn load_site_config() -> Result<SiteConfig, ConfigLoadError> {
    let config: SiteConfig = fetch_json(SITE_CONFIG_URL, CacheMode::NoCache).await?;
    let config = config.validate()?;
    log!(
        "Loaded site config: {}/{}@{} ({})",
        config.user,
        config.repo,
        config.branch,
        config.content_dir
    );
    Ok(config)
}

/// Load the optional ordering document; absent or malformed means no order.
pub async fn load_order_spec() -> OrderSpec {
    match fetch_text(ORDER_URL, CacheMode::NoCache).await {
        Ok(text) => OrderSpec::parse_lenient(&text),
        Err(err) => {
            warn!("No ordering applied: {}", err);
            OrderSpec::default()
        }
    }
}
