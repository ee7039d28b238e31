use crate::config::EnvConfig;
use crate::pages::{NoteDetailsPage, NotesPage, NOTES_PATH};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App(config: EnvConfig) -> impl IntoView {
    provide_context(AppContext(AppState::new(&config)));

    // Router hooks (location, params, navigate) require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=|| view! { <Redirect path=NOTES_PATH /> } />
                <Route path=path!("notes") view=NotesPage />
                <Route path=path!("notes/:id") view=NoteDetailsPage />
            </Routes>
        </Router>
    }
}
