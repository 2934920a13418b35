//! Top bar with the repository link and layout toggles.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;

stylance::import_crate_style!(css, "src/components/topbar/topbar.module.css");

#[component]
pub fn Topbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let repo_url = move || ctx.site.with(|s| s.as_ref().map(|c| c.repo_url()));
    let repo_label = move || {
        ctx.site
            .with(|s| s.as_ref().map(|c| format!("{}/{}", c.user, c.repo)))
            .unwrap_or_default()
    };
    let is_dark = move || ctx.prefs.with(|p| p.theme.is_dark());

    view! {
        <header class=css::topbar>
            <button
                class=css::iconButton
                on:click=move |_| ctx.toggle_sidebar()
                title="Toggle sidebar"
                aria-label="Toggle sidebar"
            >
                <Icon icon=ic::SIDEBAR />
            </button>

            <span class=css::title>{APP_NAME}</span>

            <div class=css::actions>
                <Show when=move || repo_url().is_some()>
                    <a
                        class=css::repoLink
                        href=move || repo_url().unwrap_or_default()
                        target="_blank"
                        rel="noopener noreferrer"
                        title="Open repository"
                    >
                        <span>{repo_label}</span>
                        <Icon icon=ic::EXTERNAL_LINK />
                    </a>
                </Show>

                <button
                    class=css::iconButton
                    on:click=move |_| ctx.toggle_theme()
                    title=move || if is_dark() { "Light theme" } else { "Dark theme" }
                    aria-label="Toggle theme"
                >
                    {move || {
                        if is_dark() {
                            view! { <Icon icon=ic::SUN /> }.into_any()
                        } else {
                            view! { <Icon icon=ic::MOON /> }.into_any()
                        }
                    }}
                </button>
            </div>
        </header>
    }
}
