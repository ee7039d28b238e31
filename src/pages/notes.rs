use super::NOTES_PATH;
use crate::api::ApiClient;
use crate::components::notes::{Modal, NoteForm, NoteList, Pagination, SearchBox};
use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Spinner};
use crate::models::NewNote;
use crate::pagination::next_coordinate_after;
use crate::query::{FetchTicket, MutationState, NotesQuery, Resolution};
use crate::search::SearchInputController;
use crate::state::AppContext;
use crate::url_state::PageCoordinate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};
use leptos_router::NavigateOptions;

/// Run one list request and feed the result back into the cache.
///
/// If the result is for the current coordinate and reports fewer pages than
/// the coordinate's page, the coordinate moves to the new last page.
fn spawn_notes_fetch(
    api_client: ApiClient,
    notes_query: RwSignal<NotesQuery>,
    coord: RwSignal<PageCoordinate>,
    ticket: FetchTicket<PageCoordinate>,
) {
    spawn_local(async move {
        let key = ticket.key.clone();
        let result = api_client.fetch_notes(&key).await;
        match &result {
            Ok(p) => tracing::debug!(
                page = key.page,
                search = %key.search,
                count = p.notes.len(),
                total_pages = p.total_pages,
                "notes fetched"
            ),
            Err(e) => tracing::warn!(
                page = key.page,
                search = %key.search,
                error = %e,
                "fetching notes failed"
            ),
        }
        let total_pages = result.as_ref().ok().map(|p| p.total_pages);

        let Some(resolution) = notes_query.try_update(|q| q.resolve(&ticket, result)) else {
            return;
        };
        if resolution == Resolution::Discarded {
            tracing::debug!(request_id = ticket.request_id, "dropped superseded notes response");
        }

        let next = coord
            .try_with_untracked(|c| next_coordinate_after(resolution, &key, total_pages, c))
            .flatten();
        if let Some(next) = next {
            tracing::info!(from = key.page, to = next.page, "page out of range, moving to last page");
            coord.set(next);
        }
    });
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;
    let notes_query = app_state.0.notes_query;

    let navigate = StoredValue::new(use_navigate());
    let location = use_location();
    let query = use_query_map();

    let coord: RwSignal<PageCoordinate> =
        RwSignal::new(query.with_untracked(PageCoordinate::from_params));
    let modal_open: RwSignal<bool> = RwSignal::new(false);
    let create_state: RwSignal<MutationState> = RwSignal::new(MutationState::Idle);
    let deleting_id: RwSignal<Option<String>> = RwSignal::new(None);

    let set_coord = move |next: PageCoordinate| {
        if coord.get_untracked() != next {
            coord.set(next);
        }
    };

    let search = SearchInputController::new(
        coord.get_untracked().search,
        Callback::new(move |term: String| set_coord(PageCoordinate::for_search(term))),
    );
    on_cleanup(move || search.cancel());

    // Back/forward (or any link into /notes) re-derives the coordinate.
    Effect::new(move |_| {
        let parsed = query.with(PageCoordinate::from_params);
        if parsed != coord.get_untracked() {
            tracing::debug!(page = parsed.page, search = %parsed.search, "coordinate changed by navigation");
            search.sync(&parsed.search);
            coord.set(parsed);
        }
    });

    // Coordinate -> address bar, then fetch unless cached or in flight.
    Effect::new(move |_| {
        let c = coord.get();

        let current_qs = location.search.get_untracked();
        if current_qs.trim_start_matches('?') != c.to_query_string() {
            navigate.with_value(|nav| {
                nav(
                    &c.href(NOTES_PATH),
                    NavigateOptions {
                        replace: true,
                        scroll: false,
                        ..Default::default()
                    },
                );
            });
        }

        if let Some(ticket) = notes_query.try_update(|q| q.set_key(c)).flatten() {
            spawn_notes_fetch(api_client.get_untracked(), notes_query, coord, ticket);
        }
    });

    // A create or delete can move notes across pages: every cached page is stale.
    let refetch_notes = move || {
        if let Some(ticket) = notes_query.try_update(|q| q.invalidate_all()).flatten() {
            spawn_notes_fetch(api_client.get_untracked(), notes_query, coord, ticket);
        }
    };

    let on_create = Callback::new(move |req: NewNote| {
        if create_state.get_untracked().is_pending() {
            return;
        }
        create_state.set(MutationState::Pending);

        let api_client = api_client.get_untracked();
        spawn_local(async move {
            match api_client.create_note(&req).await {
                Ok(note) => {
                    tracing::info!(id = %note.id, "note created");
                    create_state.set(MutationState::Idle);
                    modal_open.set(false);
                    refetch_notes();
                }
                Err(e) => {
                    // Form stays open with its contents so the user can retry.
                    tracing::error!(error = %e, "creating note failed");
                    create_state.set(MutationState::Failed(e.user_message()));
                }
            }
        });
    });

    let on_delete = Callback::new(move |id: String| {
        if deleting_id.get_untracked().is_some() {
            return;
        }
        if !window()
            .confirm_with_message("Delete this note?")
            .unwrap_or(false)
        {
            return;
        }
        deleting_id.set(Some(id.clone()));

        let api_client = api_client.get_untracked();
        spawn_local(async move {
            match api_client.delete_note(&id).await {
                Ok(_) => {
                    tracing::info!(id = %id, "note deleted");
                    refetch_notes();
                }
                Err(e) => {
                    tracing::error!(id = %id, error = %e, "deleting note failed");
                    let _ = window().alert_with_message(&e.user_message());
                }
            }
            deleting_id.set(None);
        });
    });

    let open_create = move |_: leptos::ev::MouseEvent| {
        create_state.set(MutationState::Idle);
        modal_open.set(true);
    };

    let close_modal = Callback::new(move |_: ()| modal_open.set(false));

    let total_pages = move || {
        notes_query.with(|q| {
            let s = q.snapshot();
            if s.error.is_some() {
                0
            } else {
                s.data.map(|d| d.total_pages).unwrap_or(0)
            }
        })
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <header class="mb-6 flex flex-wrap items-center justify-between gap-3">
                    <SearchBox controller=search />

                    <Show when=move || { total_pages() > 1 } fallback=|| ().into_view()>
                        <Pagination
                            current_page=Signal::derive(move || coord.get().page)
                            total_pages=Signal::derive(total_pages)
                            on_page_change=Callback::new(move |p: u32| {
                                set_coord(coord.get_untracked().with_page(p))
                            })
                        />
                    </Show>

                    <Button on:click=open_create>"+ Create note"</Button>
                </header>

                {move || {
                    let s = notes_query.with(|q| q.snapshot());
                    if s.is_loading() {
                        return view! {
                            <div class="flex items-center gap-2 text-sm text-muted-foreground">
                                <Spinner />
                                "Loading, please wait..."
                            </div>
                        }
                        .into_any();
                    }

                    if let Some(e) = s.error {
                        return view! {
                            <Alert class="flex items-center justify-between gap-3 border-destructive/30">
                                <AlertDescription class="text-destructive">
                                    {e.user_message()}
                                </AlertDescription>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    on:click=move |_| refetch_notes()
                                >
                                    "Try again"
                                </Button>
                            </Alert>
                        }
                        .into_any();
                    }

                    match s.data {
                        Some(data) => {
                            let class = if s.is_placeholder {
                                "opacity-60 transition-opacity"
                            } else {
                                "transition-opacity"
                            };
                            view! {
                                <div class=class>
                                    <NoteList
                                        notes=data.notes.clone()
                                        on_delete=on_delete
                                        deleting_id=Signal::derive(move || deleting_id.get())
                                    />
                                </div>
                            }
                            .into_any()
                        }
                        None => ().into_any(),
                    }
                }}

                <Show when=move || modal_open.get() fallback=|| ().into_view()>
                    <Modal title="Create new note" on_close=close_modal>
                        <NoteForm
                            on_submit=on_create
                            on_cancel=close_modal
                            submitting=Signal::derive(move || create_state.get().is_pending())
                            error=Signal::derive(move || create_state.get().error())
                        />
                    </Modal>
                </Show>
            </div>
        </div>
    }
}
