use crate::config::EnvConfig;
use crate::error::{NoteError, NoteResult};
use crate::models::{NewNote, Note, NotesPage};
use crate::url_state::{PageCoordinate, PER_PAGE};
use reqwest::Method;
use serde::de::DeserializeOwned;

/// Thin client for the NoteHub REST API.
///
/// Holds only configuration; a fresh `reqwest::Client` is built per request so
/// the value stays cheap to clone into signals and async tasks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self { base_url, token }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        if config.token.is_none() {
            tracing::warn!("no NoteHub token configured; requests will be unauthorized");
        }
        Self::new(config.api_url.clone(), config.token.clone())
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Query parameters for `GET /notes`. `search` is always sent, even when empty.
    pub(crate) fn list_query(coord: &PageCoordinate) -> Vec<(&'static str, String)> {
        vec![
            ("search", coord.search.clone()),
            ("page", coord.page.to_string()),
            ("perPage", PER_PAGE.to_string()),
        ]
    }

    fn note_path(id: &str) -> String {
        format!("/notes/{}", urlencoding::encode(id))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&NewNote>,
    ) -> NoteResult<T> {
        let client = reqwest::Client::new();
        let mut req = client.request(method.clone(), self.url(path));
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::debug!(%method, path, "notehub request");
        let res = req.send().await.map_err(NoteError::network)?;
        let status = res.status();
        let text = res.text().await.map_err(NoteError::network)?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(NoteError::decode)
        } else {
            tracing::warn!(%method, path, status = status.as_u16(), "notehub request failed");
            Err(NoteError::from_response_body(status.as_u16(), &text))
        }
    }

    pub async fn fetch_notes(&self, coord: &PageCoordinate) -> NoteResult<NotesPage> {
        self.request(Method::GET, "/notes", &Self::list_query(coord), None)
            .await
    }

    pub async fn fetch_note_by_id(&self, id: &str) -> NoteResult<Note> {
        self.request(Method::GET, &Self::note_path(id), &[], None)
            .await
    }

    pub async fn create_note(&self, note: &NewNote) -> NoteResult<Note> {
        self.request(Method::POST, "/notes", &[], Some(note)).await
    }

    pub async fn delete_note(&self, id: &str) -> NoteResult<Note> {
        self.request(Method::DELETE, &Self::note_path(id), &[], None)
            .await
    }
}
