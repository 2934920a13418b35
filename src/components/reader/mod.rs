//! Content pane: welcome text, loading placeholder, error panel or the
//! rendered document.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::models::ContentState;

stylance::import_crate_style!(css, "src/components/reader/reader.module.css");

#[component]
pub fn Reader() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let content = Memo::new(move |_| ctx.navigator.with(|n| n.content().clone()));

    move || match content.get() {
        ContentState::Welcome => view! {
            <div class=css::placeholder>
                <h1 class=css::placeholderTitle>"Welcome"</h1>
                <p class=css::placeholderText>"Select a README from the sidebar."</p>
            </div>
        }
        .into_any(),
        ContentState::Loading { path } => view! {
            <div class=css::placeholder>
                <h1 class=css::placeholderTitle>"Loading…"</h1>
                <p class=css::placeholderText>{path}</p>
            </div>
        }
        .into_any(),
        ContentState::Failed { message } => view! {
            <div class=css::error>
                <h1 class=css::errorTitle>"Error"</h1>
                <p>{message}</p>
            </div>
        }
        .into_any(),
        ContentState::Ready(doc) => view! {
            <article class=css::markdown inner_html=doc.html />
        }
        .into_any(),
    }
}
