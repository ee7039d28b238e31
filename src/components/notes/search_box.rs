use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::search::SearchInputController;
use icons::{Search, X};
use leptos::prelude::*;

#[component]
pub(crate) fn SearchBox(controller: SearchInputController) -> impl IntoView {
    let raw = controller.raw();

    view! {
        <div class="relative flex w-full max-w-xs items-center">
            <Search class="pointer-events-none absolute left-2.5 size-4 text-muted-foreground" />
            <Input
                r#type="search"
                placeholder="Search notes"
                class="pl-8 pr-9"
                bind_value=raw
                on_input=Callback::new(move |v: String| controller.input(v))
            />
            <Show when=move || !raw.get().is_empty() fallback=|| ().into_view()>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="absolute right-0"
                    attr:aria-label="Clear search"
                    on:click=move |_| controller.clear()
                >
                    <X />
                </Button>
            </Show>
        </div>
    }
}
