use super::{Debouncer, Expiry, Ticket, DEBOUNCE_MS};
use crate::util::now_ms;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Browser side of the search box.
///
/// `raw` echoes every keystroke; the committed term only reaches `on_commit`
/// after the debounce period. At most one `setTimeout` is pending at a time.
#[derive(Clone, Copy)]
pub(crate) struct SearchInputController {
    raw: RwSignal<String>,
    debouncer: StoredValue<Debouncer>,
    timer_id: StoredValue<Option<i32>>,
    on_commit: Callback<String>,
}

impl SearchInputController {
    pub fn new(initial: String, on_commit: Callback<String>) -> Self {
        Self {
            raw: RwSignal::new(initial.clone()),
            debouncer: StoredValue::new(Debouncer::new(DEBOUNCE_MS, initial)),
            timer_id: StoredValue::new(None),
            on_commit,
        }
    }

    pub fn raw(&self) -> RwSignal<String> {
        self.raw
    }

    pub fn input(&self, value: String) {
        if self.raw.get_untracked() != value {
            self.raw.set(value.clone());
        }
        if let Some(ticket) = self
            .debouncer
            .try_update_value(|d| d.keystroke(value, now_ms()))
        {
            self.arm(ticket, DEBOUNCE_MS);
        }
    }

    /// Commit the empty term now; no debounce.
    pub fn clear(&self) {
        self.cancel();
        self.raw.set(String::new());
        if let Some(term) = self.debouncer.try_update_value(|d| d.clear()) {
            self.on_commit.run(term);
        }
    }

    /// Adopt the term from an externally navigated URL.
    pub fn sync(&self, term: &str) {
        let unchanged = self
            .debouncer
            .with_value(|d| d.committed() == term && !d.has_pending());
        if unchanged {
            return;
        }
        self.cancel();
        self.raw.set(term.to_string());
        self.debouncer.update_value(|d| d.sync(term));
    }

    pub fn cancel(&self) {
        let Some(id) = self.timer_id.try_update_value(|t| t.take()).flatten() else {
            return;
        };
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(id);
        }
    }

    fn arm(&self, ticket: Ticket, delay_ms: i64) {
        self.cancel();
        let Some(win) = web_sys::window() else {
            return;
        };

        let this = *self;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || this.on_timer(ticket));
        let delay = i32::try_from(delay_ms.max(0)).unwrap_or(i32::MAX);
        let id = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay)
            .ok();
        self.timer_id.set_value(id);
    }

    fn on_timer(&self, ticket: Ticket) {
        // The page may have been unmounted while the timer was pending.
        if self.timer_id.try_update_value(|t| *t = None).is_none() {
            return;
        }

        match self.debouncer.try_update_value(|d| d.expire(ticket, now_ms())) {
            Some(Expiry::Commit(term)) => {
                tracing::debug!(search = %term, "search term committed");
                self.on_commit.run(term);
            }
            Some(Expiry::Early { remaining_ms }) => self.arm(ticket, remaining_ms),
            Some(Expiry::Unchanged) | Some(Expiry::Superseded) | None => {}
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::url_state::PageCoordinate;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn controller(initial: &str) -> (SearchInputController, RwSignal<PageCoordinate>, StoredValue<u32>) {
        let coord = RwSignal::new(PageCoordinate::new(4, initial));
        let commits = StoredValue::new(0u32);
        let c = SearchInputController::new(
            initial.to_string(),
            Callback::new(move |term: String| {
                commits.update_value(|n| *n += 1);
                coord.set(PageCoordinate::for_search(term));
            }),
        );
        (c, coord, commits)
    }

    #[wasm_bindgen_test]
    fn test_keystroke_arms_timer_without_committing() {
        let (c, coord, commits) = controller("");
        c.input("meet".to_string());

        assert_eq!(c.raw().get_untracked(), "meet");
        assert!(c.timer_id.get_value().is_some());
        assert!(c.debouncer.with_value(|d| d.has_pending()));
        assert_eq!(commits.get_value(), 0);
        assert_eq!(coord.get_untracked(), PageCoordinate::new(4, ""));
        c.cancel();
    }

    #[wasm_bindgen_test]
    fn test_clear_commits_empty_term_and_resets_page() {
        let (c, coord, commits) = controller("work");
        c.input("workshop".to_string());
        c.clear();

        assert_eq!(c.raw().get_untracked(), "");
        assert!(c.timer_id.get_value().is_none());
        assert!(!c.debouncer.with_value(|d| d.has_pending()));
        assert_eq!(commits.get_value(), 1);
        assert_eq!(coord.get_untracked(), PageCoordinate::new(1, ""));
    }

    #[wasm_bindgen_test]
    fn test_sync_adopts_term_without_committing() {
        let (c, _coord, commits) = controller("");
        c.input("dra".to_string());
        c.sync("meeting");

        assert_eq!(c.raw().get_untracked(), "meeting");
        assert!(c.timer_id.get_value().is_none());
        assert_eq!(c.debouncer.with_value(|d| d.committed().to_string()), "meeting");
        assert_eq!(commits.get_value(), 0);
    }
}
