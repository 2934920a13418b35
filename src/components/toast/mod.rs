//! Transient status notification.

use leptos::prelude::*;

use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/toast/toast.module.css");

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let message = ctx.toast.message;

    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class=css::toast role="status">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
