//! Table of contents with scroll tracking.
//!
//! Lists the level-2 and level-3 headings of the current document and
//! highlights the one being read. A fresh [`HeadingObserver`] is attached
//! for every document; the previous one is dropped (and disconnected).

use leptos::{ev, prelude::*};

use crate::app::AppContext;
use crate::core::toc::display_path;
use crate::models::{DocRoute, Document, Heading};
use crate::utils::dom;
use crate::utils::observer::HeadingObserver;

stylance::import_crate_style!(css, "src/components/toc/toc.module.css");

#[component]
pub fn Toc() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let document = Memo::new(move |_| {
        ctx.navigator
            .with(|n| n.content().document().cloned())
    });

    let observer = StoredValue::new_local(None::<HeadingObserver>);

    Effect::new(move |_| {
        let doc = document.get();
        observer.set_value(None);

        let Some(doc) = doc else {
            return;
        };
        ctx.active_heading
            .set(doc.headings.first().map(|h| h.id.clone()));

        // Headings exist in the DOM only after the content pane renders
        let ids: Vec<String> = doc.headings.iter().map(|h| h.id.clone()).collect();
        dom::next_frame(move || {
            let handle = HeadingObserver::observe(&ids, move |id| {
                ctx.active_heading.try_set(Some(id));
            });
            observer.try_set_value(handle);
        });
    });

    on_cleanup(move || {
        observer.try_set_value(None);
    });

    view! {
        <nav class=css::toc aria-label="On this page">
            <div class=css::title>"On this page"</div>
            {move || match document.get() {
                Some(doc) => view! { <TocBody doc=doc /> }.into_any(),
                None => view! { <p class=css::empty>"No headings"</p> }.into_any(),
            }}
        </nav>
    }
}

#[component]
fn TocBody(doc: Document) -> impl IntoView {
    let meta = display_path(&doc.path).to_string();

    let list = if doc.headings.is_empty() {
        view! { <p class=css::empty>"No headings"</p> }.into_any()
    } else {
        let path = doc.path.clone();
        view! {
            <ul class=css::list>
                {doc
                    .headings
                    .into_iter()
                    .map(|heading| view! { <TocEntry path=path.clone() heading=heading /> })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class=css::meta title=doc.path.clone()>{meta}</div>
        {list}
    }
}

#[component]
fn TocEntry(path: String, heading: Heading) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let Heading { id, level, text } = heading;
    let href = DocRoute::with_heading(path, id.clone()).to_hash();

    let is_active = {
        let id = id.clone();
        move || ctx.active_heading.with(|a| a.as_deref() == Some(id.as_str()))
    };

    // Scroll without touching the route
    let on_click = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        dom::scroll_to_id(&id);
        ctx.active_heading.set(Some(id.clone()));
    };

    view! {
        <li class={if level > 2 { css::nested } else { css::entry }}>
            <a
                href=href
                class=move || if is_active() { format!("{} {}", css::link, css::active) } else { css::link.to_string() }
                on:click=on_click
            >
                {text}
            </a>
        </li>
    }
}
