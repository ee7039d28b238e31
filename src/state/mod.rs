use crate::api::ApiClient;
use crate::config::EnvConfig;
use crate::query::NotesQuery;
use leptos::prelude::*;

/// App-lifetime state, created once in `App` and shared through context.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Notes list cache. Outlives the notes page so returning to the list
    /// (e.g. from a details page) renders cached pages immediately.
    pub notes_query: RwSignal<NotesQuery>,
}

impl AppState {
    pub fn new(config: &EnvConfig) -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_config(config)),
            notes_query: RwSignal::new(NotesQuery::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
