use super::NOTES_PATH;
use crate::components::ui::{
    Alert, AlertDescription, Card, CardContent, CardDescription, CardHeader, CardTitle, Spinner,
};
use crate::models::Note;
use crate::state::AppContext;
use crate::util::display_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct NoteDetailsParams {
    pub id: Option<String>,
}

#[component]
pub fn NoteDetailsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<NoteDetailsParams>();

    let note_id = move || params.get().ok().and_then(|p| p.id).unwrap_or_default();

    let note: RwSignal<Option<Note>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let request_id: RwSignal<u64> = RwSignal::new(0);

    Effect::new(move |_| {
        let id = note_id();
        if id.trim().is_empty() {
            note.set(None);
            error.set(Some("Note not found".to_string()));
            return;
        }

        let req_id = request_id.get_untracked().saturating_add(1);
        request_id.set(req_id);
        loading.set(true);
        error.set(None);

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.fetch_note_by_id(&id).await;

            // Ignore stale responses.
            if request_id.get_untracked() != req_id {
                return;
            }

            match result {
                Ok(n) => {
                    tracing::debug!(id = %n.id, "note loaded");
                    note.set(Some(n));
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "loading note failed");
                    note.set(None);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[720px] px-4 py-8 space-y-4">
                <a href=NOTES_PATH class="text-sm text-muted-foreground hover:underline">
                    "← Back to notes"
                </a>

                {move || {
                    if loading.get() {
                        return view! {
                            <div class="flex items-center gap-2 text-sm text-muted-foreground">
                                <Spinner />
                                "Loading, please wait..."
                            </div>
                        }
                        .into_any();
                    }

                    if let Some(msg) = error.get() {
                        return view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive">{msg}</AlertDescription>
                            </Alert>
                        }
                        .into_any();
                    }

                    match note.get() {
                        Some(n) => {
                            let created = display_date(&n.created_at);
                            view! {
                                <Card>
                                    <CardHeader>
                                        <CardTitle>{n.title}</CardTitle>
                                        <CardDescription>
                                            <span class="rounded bg-muted px-2 py-0.5 text-xs">
                                                {n.tag.to_string()}
                                            </span>
                                            <span class="ml-2 text-xs">{created}</span>
                                        </CardDescription>
                                    </CardHeader>
                                    <CardContent>
                                        <p class="whitespace-pre-wrap text-sm">{n.content}</p>
                                    </CardContent>
                                </Card>
                            }
                            .into_any()
                        }
                        None => ().into_any(),
                    }
                }}
            </div>
        </div>
    }
}
