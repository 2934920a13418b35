//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Storage, Window,
};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the document object.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Focus an element by CSS selector.
///
/// Returns `true` if the element was found and focused successfully.
pub fn focus_element(selector: &str) -> bool {
    if let Some(document) = document()
        && let Some(element) = document.query_selector(selector).ok().flatten()
        && let Ok(html_element) = element.dyn_into::<web_sys::HtmlElement>()
    {
        html_element.focus().is_ok()
    } else {
        false
    }
}

/// Smoothly scroll the element with `id` to the top of the viewport.
///
/// Returns `false` if no such element exists.
pub fn scroll_to_id(id: &str) -> bool {
    let Some(element) = document().and_then(|d| d.get_element_by_id(id)) else {
        return false;
    };
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&opts);
    true
}

/// Run `f` on the next animation frame.
pub fn next_frame(f: impl FnOnce() + 'static) {
    if let Some(window) = window() {
        let callback = Closure::once_into_js(f);
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Get the current URL hash (including the '#' prefix, if any).
pub fn get_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Set the URL hash (adds to browser history, fires `hashchange`).
///
/// The hash should include the '#' prefix.
pub fn set_hash(hash: &str) {
    if let Some(window) = window() {
        let _ = window.location().set_hash(hash);
    }
}
