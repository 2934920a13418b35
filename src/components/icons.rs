//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronRight as ChevronRight, LuExternalLink as ExternalLink, LuFileText as FileText,
        LuFolder as Folder, LuFolderOpen as FolderOpen, LuMoon as Moon, LuPanelLeft as Sidebar,
        LuSearch as Search, LuSun as Sun, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsBoxArrowUpRight as ExternalLink, BsChevronRight as ChevronRight,
        BsFileEarmarkText as FileText, BsFolder2 as Folder, BsFolder2Open as FolderOpen,
        BsLayoutSidebar as Sidebar, BsMoon as Moon, BsSearch as Search, BsSun as Sun,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(FILE_TEXT, FileText);
themed_icon!(SEARCH, Search);
themed_icon!(CLOSE, Close);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(SIDEBAR, Sidebar);
themed_icon!(SUN, Sun);
themed_icon!(MOON, Moon);
