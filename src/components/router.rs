//! Application router component.
//!
//! Handles deep links with hash history. Uses native hashchange events
//! instead of leptos_router for true hash routing.
//!
//! # Architecture
//!
//! - **URL hash addresses a document**: `#<encoded path>[:<heading id>]`
//! - **Layout never re-renders on navigation**: only the content pane and
//!   table of contents follow the current document
//! - **hashchange events**: Browser back/forward buttons work automatically

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::app::AppContext;
use crate::components::shell::Shell;
use crate::core::{RouteAction, resolve_route};
use crate::utils::dom;

/// Act on the current location fragment.
///
/// A fragment naming a different document opens it (without rewriting the
/// route) and scrolls to the heading once rendered. A fragment naming the
/// desired document only scrolls.
pub fn follow_route(ctx: AppContext) {
    let desired = ctx
        .navigator
        .with_untracked(|n| n.desired().map(String::from));

    match resolve_route(&dom::get_hash(), desired.as_deref()) {
        RouteAction::Nothing => {}
        RouteAction::Open { path, heading } => ctx.open_document_at(&path, heading),
        RouteAction::Scroll(id) => dom::next_frame(move || {
            dom::scroll_to_id(&id);
        }),
    }
}

// ============================================================================
// Main Router
// ============================================================================

/// Main application router.
///
/// Installs the hashchange listener and renders the shell. A failed site
/// configuration is raised to the enclosing error boundary.
#[component]
pub fn AppRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Set up hashchange event listener (runs once on mount)
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let closure = Closure::wrap(Box::new(move || {
            follow_route(ctx);
        }) as Box<dyn Fn()>);

        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    view! {
        // A startup failure surfaces as an error for the root boundary
        {move || ctx.fatal.get().map_or(Ok(()), Err)}
        <Shell />
    }
}
