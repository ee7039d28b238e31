use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

/// Centered overlay. Closes on backdrop click and on Escape.
#[component]
pub(crate) fn Modal(
    #[prop(into, optional)] title: String,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
            role="dialog"
            aria-modal="true"
            on:click=move |_| on_close.run(())
        >
            <div
                class="w-full max-w-md rounded-md border border-border bg-background p-4 shadow-lg"
                on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                {(!title.is_empty()).then(|| view! {
                    <div class="mb-3 text-sm font-medium">{title}</div>
                })}
                {children()}
            </div>
        </div>
    }
}
