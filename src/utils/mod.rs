//! Utility modules for web and DOM operations.
//!
//! Provides:
//! - [`fetch`] - Network fetching with explicit HTTP cache modes
//! - [`markdown`] - Markdown rendering with XSS sanitization and heading ids
//! - [`dom`] - Window, storage, scrolling and hash helpers
//! - [`observer`] - IntersectionObserver-based scroll-spy

pub mod dom;
pub mod fetch;
pub mod markdown;
pub mod observer;
