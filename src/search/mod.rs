//! Debounced search input.
//!
//! [`Debouncer`] is the timer-free state machine: it decides which keystroke
//! becomes a committed search term. [`SearchInputController`] owns the
//! browser timer and feeds expiries back into it.

mod controller;

pub(crate) use controller::SearchInputController;

/// Quiet period after the last keystroke before the term is committed.
pub(crate) const DEBOUNCE_MS: i64 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

/// Outcome of a timer expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Expiry {
    /// The pending term differs from the committed one and is now committed.
    Commit(String),
    /// The pending term equals the committed one; nothing to do.
    Unchanged,
    /// A later keystroke (or a clear/sync) replaced this ticket.
    Superseded,
    /// The timer fired before the deadline; re-arm for the remainder.
    Early { remaining_ms: i64 },
}

#[derive(Clone, Debug)]
struct Pending {
    ticket: u64,
    value: String,
    deadline_ms: i64,
}

#[derive(Clone, Debug)]
pub(crate) struct Debouncer {
    delay_ms: i64,
    committed: String,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl Debouncer {
    pub(crate) fn new(delay_ms: i64, committed: impl Into<String>) -> Self {
        Self {
            delay_ms,
            committed: committed.into(),
            pending: None,
            next_ticket: 0,
        }
    }

    pub(crate) fn committed(&self) -> &str {
        &self.committed
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a keystroke. Any earlier pending keystroke is superseded.
    pub(crate) fn keystroke(&mut self, value: impl Into<String>, now_ms: i64) -> Ticket {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(Pending {
            ticket: self.next_ticket,
            value: value.into(),
            deadline_ms: now_ms.saturating_add(self.delay_ms),
        });
        Ticket(self.next_ticket)
    }

    pub(crate) fn expire(&mut self, ticket: Ticket, now_ms: i64) -> Expiry {
        let Some(pending) = self.pending.as_ref() else {
            return Expiry::Superseded;
        };
        if pending.ticket != ticket.0 {
            return Expiry::Superseded;
        }
        if now_ms < pending.deadline_ms {
            return Expiry::Early {
                remaining_ms: pending.deadline_ms - now_ms,
            };
        }

        let Some(pending) = self.pending.take() else {
            return Expiry::Superseded;
        };
        if pending.value == self.committed {
            return Expiry::Unchanged;
        }
        self.committed = pending.value.clone();
        Expiry::Commit(pending.value)
    }

    /// Commit the empty term immediately, dropping any pending keystroke.
    pub(crate) fn clear(&mut self) -> String {
        self.pending = None;
        self.committed.clear();
        String::new()
    }

    /// Adopt a term that arrived from outside (URL navigation) without committing.
    pub(crate) fn sync(&mut self, term: impl Into<String>) {
        self.pending = None;
        self.committed = term.into();
    }
}
