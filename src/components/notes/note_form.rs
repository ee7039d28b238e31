use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Label, Spinner, Textarea,
};
use crate::drafts::NoteDraft;
use crate::models::{NewNote, NoteTag};
use leptos::prelude::*;
use std::str::FromStr;
use strum::VariantArray;

#[component]
pub(crate) fn NoteForm(
    on_submit: Callback<NewNote>,
    on_cancel: Callback<()>,
    #[prop(into)] submitting: Signal<bool>,
    /// Server-side failure of the last submit.
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let defaults = NoteDraft::default();
    let title: RwSignal<String> = RwSignal::new(defaults.title);
    let content: RwSignal<String> = RwSignal::new(defaults.content);
    let tag: RwSignal<NoteTag> = RwSignal::new(defaults.tag);
    let validation_error: RwSignal<Option<String>> = RwSignal::new(None);

    let current_draft = move || {
        NoteDraft::new(
            title.get_untracked(),
            content.get_untracked(),
            tag.get_untracked(),
        )
    };

    let apply_draft = move |d: NoteDraft| {
        title.set(d.title);
        content.set(d.content);
        tag.set(d.tag);
    };

    let on_form_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        match current_draft().validate() {
            Ok(req) => {
                validation_error.set(None);
                on_submit.run(req);
            }
            Err(e) => validation_error.set(Some(e.user_message())),
        }
    };

    // Cancel sits inside the form; stop it from acting as a submit button.
    let on_cancel_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let mut d = current_draft();
        d.reset();
        apply_draft(d);
        validation_error.set(None);
        on_cancel.run(());
    };

    let on_tag_change = move |ev: web_sys::Event| {
        let v = event_target_value(&ev);
        if let Ok(t) = NoteTag::from_str(&v) {
            tag.set(t);
        }
    };

    let shown_error = move || validation_error.get().or_else(|| error.get());

    view! {
        <form class="flex flex-col gap-4" on:submit=on_form_submit>
            <div class="flex flex-col gap-2">
                <Label html_for="note-title">"Title"</Label>
                <Input id="note-title" bind_value=title required=true autofocus=true />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="note-content">"Content"</Label>
                <Textarea id="note-content" bind_value=content rows=8 />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="note-tag">"Tag"</Label>
                <select
                    id="note-tag"
                    class="border-input h-9 w-full rounded-md border bg-transparent px-3 text-sm"
                    prop:value=move || tag.get().to_string()
                    on:change=on_tag_change
                >
                    {NoteTag::VARIANTS
                        .iter()
                        .map(|t| {
                            let name = t.to_string();
                            view! { <option value=name.clone()>{name.clone()}</option> }
                        })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || shown_error().is_some() fallback=|| ().into_view()>
                {move || shown_error().map(|e| view! {
                    <Alert class="border-destructive/30">
                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                    </Alert>
                })}
            </Show>

            <div class="flex items-center justify-end gap-2 pt-2">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    on:click=on_cancel_click
                >
                    "Cancel"
                </Button>
                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || submitting.get()
                >
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || submitting.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {move || if submitting.get() { "Saving..." } else { "Save" }}
                    </span>
                </Button>
            </div>
        </form>
    }
}
