//! Keyed fetch cache with stale-while-revalidate display.
//!
//! The client never performs I/O itself. Callers ask it what to fetch
//! ([`QueryClient::set_key`], [`QueryClient::invalidate_all`]), run the request,
//! and hand the result back with the ticket they were given
//! ([`QueryClient::resolve`]). Request ids on the tickets make late responses
//! for abandoned keys harmless.

mod mutation;

pub(crate) use mutation::MutationState;

use crate::error::NoteError;
use crate::models::NotesPage;
use crate::url_state::PageCoordinate;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Keys kept in the cache at once; least recently used inactive keys go first.
pub(crate) const MAX_CACHED_KEYS: usize = 24;

/// App-lifetime cache for the notes list, keyed by `(page, search)`.
pub(crate) type NotesQuery = QueryClient<PageCoordinate, NotesPage>;

/// Permission to run one request for `key`; hand it back to `resolve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchTicket<K> {
    pub key: K,
    pub request_id: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Result belongs to the current key and is now displayed.
    Applied,
    /// Result stored for a key that is no longer current.
    Cached,
    /// Ticket was superseded (invalidation or re-fetch); result dropped.
    Discarded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

struct Entry<V> {
    data: Option<Arc<V>>,
    error: Option<NoteError>,
    stale: bool,
    in_flight: Option<u64>,
    last_used: u64,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            stale: false,
            in_flight: None,
            last_used: 0,
        }
    }
}

impl<V> Entry<V> {
    fn is_fresh(&self) -> bool {
        self.data.is_some() && self.error.is_none() && !self.stale
    }

}

/// What the view should render for the current key.
#[derive(Debug)]
pub(crate) struct QuerySnapshot<V> {
    pub status: QueryStatus,
    /// Current key's data, or the last displayed data while it loads.
    pub data: Option<Arc<V>>,
    /// `data` belongs to an earlier key or an outdated result.
    pub is_placeholder: bool,
    /// A request for the current key is in flight.
    pub is_fetching: bool,
    pub error: Option<NoteError>,
}

impl<V> Clone for QuerySnapshot<V> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            is_placeholder: self.is_placeholder,
            is_fetching: self.is_fetching,
            error: self.error.clone(),
        }
    }
}

impl<V> QuerySnapshot<V> {
    /// Nothing to show yet: the first fetch is still pending.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading && self.data.is_none()
    }
}

pub(crate) struct QueryClient<K, V> {
    entries: HashMap<K, Entry<V>>,
    current: Option<K>,
    /// Last data rendered for any key; kept while the current key loads.
    displayed: Option<(K, Arc<V>)>,
    next_request_id: u64,
    /// Bumped on every `set_key`; orders entries for eviction.
    clock: u64,
}

impl<K, V> Default for QueryClient<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> QueryClient<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            current: None,
            displayed: None,
            next_request_id: 0,
            clock: 0,
        }
    }

    fn issue(&mut self, key: K) -> FetchTicket<K> {
        self.next_request_id = self.next_request_id.wrapping_add(1);
        let request_id = self.next_request_id;
        self.entries.entry(key.clone()).or_default().in_flight = Some(request_id);
        FetchTicket { key, request_id }
    }

    /// Make `key` current. Returns a ticket only when neither a fresh result
    /// nor an in-flight request exists for it.
    pub fn set_key(&mut self, key: K) -> Option<FetchTicket<K>> {
        self.current = Some(key.clone());
        self.clock = self.clock.wrapping_add(1);

        let entry = self.entries.entry(key.clone()).or_default();
        entry.last_used = self.clock;
        if let Some(data) = entry.data.clone() {
            if entry.error.is_none() {
                self.displayed = Some((key.clone(), data));
            }
        }
        let needs_fetch = entry.in_flight.is_none() && !entry.is_fresh();
        self.evict();

        needs_fetch.then(|| self.issue(key))
    }

    /// Drop least recently used keys beyond `MAX_CACHED_KEYS`. The current key
    /// and keys with a request in flight are kept.
    fn evict(&mut self) {
        while self.entries.len() > MAX_CACHED_KEYS {
            let victim = self
                .entries
                .iter()
                .filter(|(k, e)| self.current.as_ref() != Some(*k) && e.in_flight.is_none())
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            match victim {
                Some(k) => {
                    self.entries.remove(&k);
                }
                None => break,
            }
        }
    }

    pub fn resolve(&mut self, ticket: &FetchTicket<K>, result: Result<V, NoteError>) -> Resolution {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return Resolution::Discarded;
        };
        if entry.in_flight != Some(ticket.request_id) {
            return Resolution::Discarded;
        }

        entry.in_flight = None;
        entry.stale = false;
        let data = match result {
            Ok(v) => {
                let data = Arc::new(v);
                entry.data = Some(data.clone());
                entry.error = None;
                Some(data)
            }
            Err(e) => {
                entry.error = Some(e);
                None
            }
        };

        if self.current.as_ref() != Some(&ticket.key) {
            return Resolution::Cached;
        }
        if let Some(data) = data {
            self.displayed = Some((ticket.key.clone(), data));
        }
        Resolution::Applied
    }

    /// Forget every cached result and drop in-flight requests.
    ///
    /// The current key keeps its data (marked stale) as the placeholder and
    /// is re-fetched right away; other keys fetch again when they become
    /// current.
    pub fn invalidate_all(&mut self) -> Option<FetchTicket<K>> {
        let current = self.current.clone();
        self.entries.retain(|k, _| current.as_ref() == Some(k));

        let key = current?;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.stale = true;
            entry.in_flight = None;
        }
        Some(self.issue(key))
    }

    #[cfg(test)]
    fn cached_keys(&self) -> usize {
        self.entries.len()
    }

    pub fn snapshot(&self) -> QuerySnapshot<V> {
        let entry = self.current.as_ref().and_then(|k| self.entries.get(k));
        let Some(entry) = entry else {
            return QuerySnapshot {
                status: QueryStatus::Idle,
                data: self.displayed.as_ref().map(|(_, d)| d.clone()),
                is_placeholder: self.displayed.is_some(),
                is_fetching: false,
                error: None,
            };
        };

        let is_fetching = entry.in_flight.is_some();
        let status = if entry.error.is_some() && !is_fetching {
            QueryStatus::Error
        } else if is_fetching {
            QueryStatus::Loading
        } else if entry.data.is_some() {
            QueryStatus::Success
        } else {
            QueryStatus::Idle
        };

        let own = entry.data.clone().filter(|_| entry.error.is_none());
        let (data, is_placeholder) = match own {
            Some(d) if !entry.stale || !is_fetching => (Some(d), false),
            Some(d) => (Some(d), true),
            None => (
                self.displayed.as_ref().map(|(_, d)| d.clone()),
                self.displayed.is_some(),
            ),
        };

        QuerySnapshot {
            status,
            data,
            is_placeholder,
            is_fetching,
            error: if status == QueryStatus::Error {
                entry.error.clone()
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, NoteTag};
    use crate::pagination::next_coordinate_after;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("note {id}"),
            content: String::new(),
            tag: NoteTag::Todo,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn page(ids: &[&str], total_pages: u32) -> NotesPage {
        NotesPage {
            notes: ids.iter().map(|id| note(id)).collect(),
            total_pages,
        }
    }

    fn ids(s: &QuerySnapshot<NotesPage>) -> Vec<String> {
        s.data
            .as_ref()
            .map(|d| d.notes.iter().map(|n| n.id.clone()).collect())
            .unwrap_or_default()
    }

    fn key(p: u32, s: &str) -> PageCoordinate {
        PageCoordinate::new(p, s)
    }

    #[test]
    fn test_initial_key_fetches_and_loads() {
        let mut q = NotesQuery::new();
        assert_eq!(q.snapshot().status, QueryStatus::Idle);

        let t = q.set_key(key(1, "")).expect("first access fetches");
        let s = q.snapshot();
        assert!(s.is_loading());
        assert!(s.data.is_none());

        assert_eq!(q.resolve(&t, Ok(page(&["a", "b"], 2))), Resolution::Applied);
        let s = q.snapshot();
        assert_eq!(s.status, QueryStatus::Success);
        assert!(!s.is_placeholder);
        assert_eq!(ids(&s), vec!["a", "b"]);
    }

    #[test]
    fn test_in_flight_request_is_shared() {
        let mut q = NotesQuery::new();
        assert!(q.set_key(key(1, "")).is_some());
        assert!(q.set_key(key(1, "")).is_none());
    }

    #[test]
    fn test_fresh_cache_is_served_without_fetch() {
        let mut q = NotesQuery::new();
        let t1 = q.set_key(key(1, "")).unwrap();
        q.resolve(&t1, Ok(page(&["a"], 2)));
        let t2 = q.set_key(key(2, "")).unwrap();
        q.resolve(&t2, Ok(page(&["b"], 2)));

        assert!(q.set_key(key(1, "")).is_none());
        let s = q.snapshot();
        assert_eq!(ids(&s), vec!["a"]);
        assert!(!s.is_placeholder);
    }

    #[test]
    fn test_previous_data_stays_visible_while_next_key_loads() {
        let mut q = NotesQuery::new();
        let t1 = q.set_key(key(1, "")).unwrap();
        q.resolve(&t1, Ok(page(&["a"], 3)));

        let _t2 = q.set_key(key(2, "")).unwrap();
        let s = q.snapshot();
        assert_eq!(s.status, QueryStatus::Loading);
        assert!(!s.is_loading());
        assert!(s.is_fetching);
        assert!(s.is_placeholder);
        assert_eq!(ids(&s), vec!["a"]);
    }

    #[test]
    fn test_abandoned_key_result_is_not_displayed() {
        let mut q = NotesQuery::new();
        let t0 = q.set_key(key(1, "")).unwrap();
        q.resolve(&t0, Ok(page(&["initial"], 1)));

        let ta = q.set_key(key(1, "me")).unwrap();
        let tb = q.set_key(key(1, "meeting")).unwrap();

        assert_eq!(q.resolve(&ta, Ok(page(&["A"], 1))), Resolution::Cached);
        assert_eq!(ids(&q.snapshot()), vec!["initial"]);

        assert_eq!(q.resolve(&tb, Ok(page(&["B"], 1))), Resolution::Applied);
        assert_eq!(ids(&q.snapshot()), vec!["B"]);

        // The abandoned key's result is still cached.
        assert!(q.set_key(key(1, "me")).is_none());
        assert_eq!(ids(&q.snapshot()), vec!["A"]);
    }

    #[test]
    fn test_out_of_order_arrival_keeps_current_key() {
        let mut q = NotesQuery::new();
        let ta = q.set_key(key(1, "a")).unwrap();
        let tb = q.set_key(key(1, "b")).unwrap();

        assert_eq!(q.resolve(&tb, Ok(page(&["B"], 1))), Resolution::Applied);
        assert_eq!(q.resolve(&ta, Ok(page(&["A"], 1))), Resolution::Cached);
        assert_eq!(ids(&q.snapshot()), vec!["B"]);
    }

    #[test]
    fn test_fetch_error_is_surfaced_and_retried_on_next_access() {
        let mut q = NotesQuery::new();
        let t = q.set_key(key(1, "")).unwrap();
        let err = NoteError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(q.resolve(&t, Err(err.clone())), Resolution::Applied);

        let s = q.snapshot();
        assert_eq!(s.status, QueryStatus::Error);
        assert_eq!(s.error, Some(err));

        let t_other = q.set_key(key(2, "")).unwrap();
        q.resolve(&t_other, Ok(page(&["x"], 2)));
        assert!(q.set_key(key(1, "")).is_some(), "failed key fetches again");
        assert_eq!(q.snapshot().status, QueryStatus::Loading);
    }

    #[test]
    fn test_invalidate_refetches_current_and_marks_others_stale() {
        let mut q = NotesQuery::new();
        let t1 = q.set_key(key(1, "")).unwrap();
        q.resolve(&t1, Ok(page(&["a"], 2)));
        let t2 = q.set_key(key(2, "")).unwrap();
        q.resolve(&t2, Ok(page(&["b"], 2)));

        let refetch = q.invalidate_all().expect("current key refetches");
        assert_eq!(refetch.key, key(2, ""));

        // Stale data stays on screen while revalidating.
        let s = q.snapshot();
        assert!(s.is_fetching);
        assert!(s.is_placeholder);
        assert_eq!(ids(&s), vec!["b"]);

        q.resolve(&refetch, Ok(page(&["b2"], 2)));
        assert_eq!(ids(&q.snapshot()), vec!["b2"]);

        // Page 1 was dropped; it fetches on next access behind the last page shown.
        let again = q.set_key(key(1, "")).expect("dropped entry refetches");
        let s = q.snapshot();
        assert!(s.is_placeholder);
        assert_eq!(ids(&s), vec!["b2"]);
        q.resolve(&again, Ok(page(&["a2"], 2)));
        assert_eq!(ids(&q.snapshot()), vec!["a2"]);
    }

    #[test]
    fn test_failed_current_key_can_be_retried() {
        let mut q = NotesQuery::new();
        let t = q.set_key(key(3, "x")).unwrap();
        q.resolve(&t, Err(NoteError::Network("offline".to_string())));
        assert_eq!(q.snapshot().status, QueryStatus::Error);

        let retry = q.invalidate_all().expect("failed key fetches again");
        assert_eq!(retry.key, key(3, "x"));
        assert!(q.snapshot().is_loading());

        assert_eq!(q.resolve(&retry, Ok(page(&["r"], 3))), Resolution::Applied);
        assert_eq!(ids(&q.snapshot()), vec!["r"]);
    }

    #[test]
    fn test_invalidate_keeps_only_current_key() {
        let mut q = NotesQuery::new();
        for i in 0..10 {
            let t = q.set_key(key(1, &format!("term {i}"))).unwrap();
            q.resolve(&t, Ok(page(&["x"], 1)));
        }
        assert_eq!(q.cached_keys(), 10);

        let refetch = q.invalidate_all().unwrap();
        assert_eq!(refetch.key, key(1, "term 9"));
        assert_eq!(q.cached_keys(), 1);
    }

    #[test]
    fn test_many_searches_stay_within_cap() {
        let mut q = NotesQuery::new();
        for i in 0..500 {
            let t = q.set_key(key(1, &format!("search {i}"))).unwrap();
            q.resolve(&t, Ok(page(&[], 1)));
        }
        assert_eq!(q.cached_keys(), MAX_CACHED_KEYS);

        // Most recent inactive key is still cached, the oldest one is not.
        assert!(q.set_key(key(1, "search 498")).is_none());
        assert!(q.set_key(key(1, "search 0")).is_some());
    }

    #[test]
    fn test_eviction_spares_in_flight_keys() {
        let mut q = NotesQuery::new();
        let pending = q.set_key(key(1, "slow")).unwrap();
        for i in 0..(MAX_CACHED_KEYS + 5) {
            let t = q.set_key(key(1, &format!("fast {i}"))).unwrap();
            q.resolve(&t, Ok(page(&[], 1)));
        }
        assert_eq!(q.resolve(&pending, Ok(page(&["s"], 1))), Resolution::Cached);
    }

    #[test]
    fn test_invalidate_discards_in_flight_responses() {
        let mut q = NotesQuery::new();
        let before = q.set_key(key(1, "")).unwrap();
        let after = q.invalidate_all().unwrap();
        assert_ne!(before.request_id, after.request_id);

        assert_eq!(q.resolve(&before, Ok(page(&["old"], 1))), Resolution::Discarded);
        assert_eq!(q.resolve(&after, Ok(page(&["new"], 1))), Resolution::Applied);
        assert_eq!(ids(&q.snapshot()), vec!["new"]);
    }

    #[test]
    fn test_invalidate_without_current_key_issues_nothing() {
        let mut q = NotesQuery::new();
        assert!(q.invalidate_all().is_none());
    }

    #[test]
    fn test_deleting_last_note_on_last_page_clamps() {
        let mut q = NotesQuery::new();
        let t = q.set_key(key(2, "")).unwrap();
        q.resolve(&t, Ok(page(&["only"], 2)));

        // Delete succeeded: page 2 is re-fetched and comes back empty.
        let refetch = q.invalidate_all().unwrap();
        assert_eq!(q.resolve(&refetch, Ok(page(&[], 1))), Resolution::Applied);
        let s = q.snapshot();
        assert!(ids(&s).is_empty());
        let total = s.data.as_ref().map(|d| d.total_pages);

        let next = next_coordinate_after(Resolution::Applied, &key(2, ""), total, &key(2, ""))
            .expect("page past the end moves");
        assert_eq!(next, key(1, ""));

        // The view moves to the new last page.
        let t1 = q.set_key(next).expect("page 1 fetches");
        assert!(q.snapshot().is_placeholder);
        q.resolve(&t1, Ok(page(&["p1"], 1)));
        assert_eq!(ids(&q.snapshot()), vec!["p1"]);
    }
}
