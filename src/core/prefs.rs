//! UI preference persistence using localStorage.
//!
//! Preferences are read once at startup and written on every change.
//! Writes are best-effort: a failure is logged and otherwise ignored.

use leptos::logging::warn;

use crate::config::storage_keys;
use crate::core::error::StorageError;
use crate::models::preferences::{decode_flag, encode_flag};
use crate::models::{Preferences, Theme};
use crate::utils::dom;

fn get_item(key: &str) -> Option<String> {
    let storage = dom::local_storage()?;
    storage.get_item(key).ok()?
}

fn set_item(key: &str, value: &str) -> Result<(), StorageError> {
    let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
    storage
        .set_item(key, value)
        .map_err(|_| StorageError::WriteFailed)
}

fn store(key: &str, value: &str) {
    if let Err(err) = set_item(key, value) {
        warn!("Could not persist {}: {}", key, err);
    }
}

/// Build preferences from raw stored values.
pub fn from_stored(collapsed: Option<&str>, query: Option<&str>, theme: Option<&str>) -> Preferences {
    Preferences {
        sidebar_collapsed: decode_flag(collapsed),
        search_query: query.unwrap_or_default().trim().to_string(),
        theme: Theme::from_stored(theme),
    }
}

/// Read all preferences; missing storage yields defaults.
pub fn load() -> Preferences {
    from_stored(
        get_item(storage_keys::SIDEBAR_COLLAPSED).as_deref(),
        get_item(storage_keys::SEARCH_QUERY).as_deref(),
        get_item(storage_keys::THEME).as_deref(),
    )
}

pub fn save_sidebar_collapsed(collapsed: bool) {
    store(storage_keys::SIDEBAR_COLLAPSED, encode_flag(collapsed));
}

pub fn save_search_query(query: &str) {
    store(storage_keys::SEARCH_QUERY, query);
}

pub fn save_theme(theme: Theme) {
    store(storage_keys::THEME, theme.as_str());
}
