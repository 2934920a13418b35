//! Core logic for the documentation browser.
//!
//! This module provides:
//! - [`ContentSource`] / [`GitHubSource`] remote access
//! - [`ordering::order`] display ordering
//! - [`SidebarTree`] lazy tree with session caches, plus filtering
//! - [`loader`] async expansion driver
//! - [`DocumentNavigator`] stale-safe document loading and route resolution
//! - [`toc`] heading ids and scroll-spy selection
//! - [`prefs`] persisted UI preferences

pub mod document;
pub mod error;
mod filter;
pub mod loader;
pub mod ordering;
pub mod prefs;
pub mod source;
pub mod toc;
pub mod tree;

pub use document::{DocumentNavigator, RouteAction, resolve_route};
pub use source::{ContentSource, GitHubSource};
pub use tree::{Expansion, RowStatus, SidebarTree, TreeRow};
