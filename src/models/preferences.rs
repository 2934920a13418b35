//! UI preferences persisted across reloads.

/// Color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored value; anything unrecognized is the default.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[inline]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// The persisted part of the route state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Whether the sidebar is collapsed
    pub sidebar_collapsed: bool,
    /// Last search query, trimmed (case preserved for the search box)
    pub search_query: String,
    /// Color theme
    pub theme: Theme,
}

/// Encode the sidebar flag the way it is stored.
pub fn encode_flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Decode a stored sidebar flag; only `"1"` means set.
pub fn decode_flag(value: Option<&str>) -> bool {
    value == Some("1")
}

/// Normalize a search box value into the query used for filtering.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}
