//! UI components built with Leptos.
//!
//! - [`router`] - Hash routing (main entry point)
//! - [`shell`] - Page layout and the fatal startup panel
//! - [`topbar`] - Repository link, sidebar and theme toggles
//! - [`sidebar`] - Search box and document tree
//! - [`reader`] - Rendered document pane
//! - [`toc`] - Table of contents with scroll tracking
//! - [`toast`] - Transient notifications
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod icons;
pub mod reader;
pub mod router;
pub mod shell;
pub mod sidebar;
pub mod toast;
pub mod toc;
pub mod topbar;

pub use router::AppRouter;
