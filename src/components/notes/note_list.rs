use crate::components::ui::{Button, ButtonSize, ButtonVariant, CardItem, CardList};
use crate::models::Note;
use leptos::prelude::*;

#[component]
pub(crate) fn NoteList(
    notes: Vec<Note>,
    on_delete: Callback<String>,
    /// Id of the note whose delete request is in flight.
    #[prop(into)] deleting_id: Signal<Option<String>>,
) -> impl IntoView {
    if notes.is_empty() {
        return view! {
            <p class="py-8 text-center text-sm text-muted-foreground">"No notes found"</p>
        }
        .into_any();
    }

    view! {
        <CardList>
            {notes
                .into_iter()
                .map(|note| {
                    let id = note.id.clone();
                    let id_for_busy = note.id.clone();
                    let href = format!("/notes/{}", note.id);
                    let is_deleting = move || deleting_id.get().as_deref() == Some(id_for_busy.as_str());
                    let is_deleting_attr = is_deleting.clone();
                    view! {
                        <CardItem>
                            <h2 class="truncate text-base font-semibold">{note.title}</h2>
                            <p class="line-clamp-4 whitespace-pre-wrap text-sm text-muted-foreground">
                                {note.content}
                            </p>
                            <div class="mt-auto flex items-center justify-between gap-2">
                                <span class="rounded-full border px-2.5 py-0.5 text-xs">
                                    {note.tag.to_string()}
                                </span>
                                <div class="flex items-center gap-2">
                                    <a
                                        href=href
                                        class="text-xs text-primary underline-offset-4 hover:underline"
                                    >
                                        "View details"
                                    </a>
                                    <Button
                                        variant=ButtonVariant::Destructive
                                        size=ButtonSize::Sm
                                        attr:disabled=is_deleting_attr
                                        on:click=move |_| on_delete.run(id.clone())
                                    >
                                        {move || if is_deleting() { "Deleting..." } else { "Delete" }}
                                    </Button>
                                </div>
                            </div>
                        </CardItem>
                    }
                })
                .collect_view()}
        </CardList>
    }
    .into_any()
}
