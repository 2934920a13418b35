//! Sidebar: search box, status hint and the document tree.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;

use crate::app::{AppContext, SidebarHint};
use crate::components::icons as ic;
use crate::core::{RowStatus, TreeRow};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/sidebar/sidebar.module.css");

const SEARCH_INPUT_ID: &str = "sidebar-search";

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Raw input text; the tree and storage only ever see the trimmed query
    let query = RwSignal::new(ctx.prefs.with_untracked(|p| p.search_query.clone()));

    let on_input = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        ctx.search(&value);
        query.set(value);
    };

    let on_clear = move |_: ev::MouseEvent| {
        query.set(String::new());
        ctx.search("");
        dom::focus_element(&format!("#{}", SEARCH_INPUT_ID));
    };

    view! {
        <nav class=css::sidebar aria-label="Documents">
            <div class=css::search>
                <span class=css::searchIcon><Icon icon=ic::SEARCH /></span>
                <input
                    id=SEARCH_INPUT_ID
                    class=css::searchInput
                    type="search"
                    placeholder="Filter…"
                    autocomplete="off"
                    prop:value=move || query.get()
                    on:input=on_input
                />
                <Show when=move || query.with(|q| !q.is_empty())>
                    <button class=css::clearButton on:click=on_clear title="Clear" aria-label="Clear">
                        <Icon icon=ic::CLOSE />
                    </button>
                </Show>
            </div>

            <div class=move || {
                if ctx.hint.get() == SidebarHint::Error {
                    format!("{} {}", css::hint, css::hintError)
                } else {
                    css::hint.to_string()
                }
            }>
                {move || ctx.hint.get().label()}
                <Show when=move || ctx.tree.with(|t| t.root_failed())>
                    <button class=css::retryButton on:click=move |_| ctx.retry_root()>
                        "Retry"
                    </button>
                </Show>
            </div>

            <ul class=css::tree role="tree">
                <For
                    each=move || ctx.tree.with(|t| t.rows())
                    key=|row| row.clone()
                    children=move |row| view! { <TreeItem row=row /> }
                />
            </ul>
        </nav>
    }
}

#[component]
fn TreeItem(row: TreeRow) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let TreeRow {
        path,
        label,
        depth,
        is_dir,
        open,
        status,
        active,
    } = row;

    let icon = match (is_dir, open) {
        (false, _) => ic::FILE_TEXT,
        (true, false) => ic::FOLDER,
        (true, true) => ic::FOLDER_OPEN,
    };

    let mut class = css::item.to_string();
    if active {
        class.push(' ');
        class.push_str(css::active);
    }
    if is_dir {
        class.push(' ');
        class.push_str(css::directory);
    }

    let (title, note) = match &status {
        RowStatus::Idle => (path.clone(), None),
        RowStatus::Loading => (path.clone(), Some("…")),
        RowStatus::Failed(msg) => (format!("{}: {}", path, msg), Some("!")),
    };
    let failed = matches!(status, RowStatus::Failed(_));

    let on_click = move |_: ev::MouseEvent| {
        if is_dir {
            ctx.toggle_directory(&path);
        } else {
            ctx.open_document(&path, true);
        }
    };

    view! {
        <li role="treeitem" aria-expanded={is_dir.then_some(open.to_string())}>
            <button
                class=class
                style=format!("padding-left: {:.2}rem", 0.75 + depth as f64 * 0.9)
                title=title
                on:click=on_click
            >
                {is_dir.then(|| view! {
                    <span class={if open { css::chevronOpen } else { css::chevron }}>
                        <Icon icon=ic::CHEVRON_RIGHT />
                    </span>
                })}
                <span class=css::icon><Icon icon=icon /></span>
                <span class=css::label>{label}</span>
                {note.map(|n| view! {
                    <span class={if failed { css::noteError } else { css::note }}>{n}</span>
                })}
            </button>
        </li>
    }
}
