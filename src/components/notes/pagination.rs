use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::pagination::PaginationModel;
use leptos::prelude::*;

#[component]
pub(crate) fn Pagination(
    #[prop(into)] current_page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    on_page_change: Callback<u32>,
) -> impl IntoView {
    let model = move || PaginationModel::new(current_page.get(), total_pages.get());
    // Click handlers run outside any reactive scope.
    let model_untracked =
        move || PaginationModel::new(current_page.get_untracked(), total_pages.get_untracked());

    let on_prev = move |_: web_sys::MouseEvent| {
        if let Some(p) = model_untracked().prev_target() {
            on_page_change.run(p);
        }
    };
    let on_next = move |_: web_sys::MouseEvent| {
        if let Some(p) = model_untracked().next_target() {
            on_page_change.run(p);
        }
    };

    view! {
        <nav aria-label="Pagination">
            <ul class="flex flex-wrap items-center gap-1">
                <li>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Page
                        attr:aria-label="Previous page"
                        attr:aria-disabled=move || (!model().prev_enabled()).to_string()
                        attr:disabled=move || !model().prev_enabled()
                        on:click=on_prev
                    >
                        "‹"
                    </Button>
                </li>
                {move || {
                    let m = model();
                    m.pages()
                        .map(|page| {
                            let active = m.is_active(page);
                            view! {
                                <li>
                                    <Button
                                        variant=if active { ButtonVariant::Default } else { ButtonVariant::Outline }
                                        size=ButtonSize::Page
                                        attr:aria-current=if active { "page" } else { "false" }
                                        on:click=move |_| on_page_change.run(page)
                                    >
                                        {page}
                                    </Button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
                <li>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Page
                        attr:aria-label="Next page"
                        attr:aria-disabled=move || (!model().next_enabled()).to_string()
                        attr:disabled=move || !model().next_enabled()
                        on:click=on_next
                    >
                        "›"
                    </Button>
                </li>
            </ul>
        </nav>
    }
}
