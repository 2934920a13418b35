//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Site-specific values (repository owner, name, branch, content root) are
//! loaded at runtime from [`SITE_CONFIG_URL`].

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the top bar.
pub const APP_NAME: &str = "Writeups";

// =============================================================================
// Site Documents
// =============================================================================

/// Site configuration document (required).
pub const SITE_CONFIG_URL: &str = "data/config.json";

/// Manual ordering document (optional).
pub const ORDER_URL: &str = "data/order.json";

// =============================================================================
// Remote Repository
// =============================================================================

/// GitHub REST API base for directory listings.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Host serving raw file contents.
pub const GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Web base used for the repository link.
pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// The only file name shown in the sidebar (compared case-insensitively).
pub const DOCUMENT_FILE_NAME: &str = "readme.md";

/// Sidebar label used for every document leaf.
pub const DOCUMENT_LABEL: &str = "README";

/// Path segment from which the TOC meta line starts, when present.
pub const DOCUMENT_META_ANCHOR: &str = "writeups/";

// =============================================================================
// Table of Contents
// =============================================================================

/// Heading configuration for the table of contents.
pub mod toc {
    /// Heading levels collected into the table of contents.
    pub const LEVELS: [u8; 2] = [2, 3];

    /// Maximum length of a derived heading id.
    pub const MAX_ID_LEN: usize = 80;

    /// Id used when a heading's text produces nothing usable.
    pub const FALLBACK_ID: &str = "section";

    /// Scroll-spy band: headings between 20% and 30% from the top are "current".
    pub const OBSERVER_ROOT_MARGIN: &str = "-20% 0px -70% 0px";

    /// Intersection ratios that trigger the scroll-spy callback.
    pub const OBSERVER_THRESHOLDS: [f64; 2] = [0.0, 1.0];
}

// =============================================================================
// Persistence
// =============================================================================

/// localStorage keys for UI preferences.
pub mod storage_keys {
    /// Sidebar collapsed flag (`"1"` / `"0"`).
    pub const SIDEBAR_COLLAPSED: &str = "sidebar_collapsed";
    /// Last search query.
    pub const SEARCH_QUERY: &str = "sidebar_search";
    /// Theme preference (`"light"` / `"dark"`).
    pub const THEME: &str = "theme";
}

// =============================================================================
// UI Configuration
// =============================================================================

/// How long a toast stays visible, in milliseconds.
pub const TOAST_DURATION_MS: u32 = 1400;

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
