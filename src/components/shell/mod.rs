//! Page layout: top bar, sidebar, content pane and table of contents.
//!
//! Theme and sidebar visibility are applied as classes on the layout root.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::reader::Reader;
use crate::components::sidebar::Sidebar;
use crate::components::toast::Toast;
use crate::components::toc::Toc;
use crate::components::topbar::Topbar;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/shell/shell.module.css");

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let class = move || {
        ctx.prefs.with(|p| {
            let mut class = css::shell.to_string();
            if p.theme.is_dark() {
                class.push(' ');
                class.push_str(css::dark);
            }
            if p.sidebar_collapsed {
                class.push(' ');
                class.push_str(css::collapsed);
            }
            class
        })
    };

    view! {
        <div class=class>
            <Topbar />
            <div class=css::body>
                <aside class=css::sidebar>
                    <Sidebar />
                </aside>
                <main class=format!("{} scrollbar-thin", css::content)>
                    <Reader />
                </main>
                <aside class=css::toc>
                    <Toc />
                </aside>
            </div>
            <Toast />
        </div>
    }
}

/// Fallback of the root error boundary, e.g. when the site configuration
/// cannot load.
#[component]
pub fn FatalPanel(messages: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <div class=css::fatal>
            <h1 class=css::fatalTitle>"Unable to start"</h1>
            <ul class=css::fatalMessage>
                {move || messages.get().into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
            </ul>
            <button
                class=css::reload
                on:click=move |_| {
                    if let Some(window) = dom::window() {
                        let _ = window.location().reload();
                    }
                }
            >
                "Reload Page"
            </button>
        </div>
    }
}
