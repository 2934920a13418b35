//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`DirectoryEntry`], [`EntryKind`] - Repository listing entries
//! - [`SiteConfig`], [`OrderSpec`] - Site documents loaded at startup
//! - [`DocRoute`] - Hash-based deep links
//! - [`Preferences`], [`Theme`] - Persisted UI state
//! - [`Document`], [`Heading`], [`ContentState`] - Rendered content

mod document;
mod entry;
pub mod preferences;
mod route;
mod site;

pub use document::{ContentState, Document, Heading};
pub use entry::{DirectoryEntry, EntryKind};
pub use preferences::{Preferences, Theme};
pub use route::DocRoute;
pub use site::{OrderSpec, SiteConfig};
