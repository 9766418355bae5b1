use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Delay between the last keystroke and committing a search.
pub(crate) const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Identifies one scheduled commit; only the latest ticket may fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

/// Timer-reset state machine behind [`use_debounced`].
///
/// Every `push` supersedes the previous one. `fire` yields the pending value
/// only for the most recent ticket, and only once.
#[derive(Debug)]
pub(crate) struct Debouncer<T> {
    pending: Option<T>,
    latest: u64,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            latest: 0,
        }
    }
}

impl<T> Debouncer<T> {
    pub fn push(&mut self, value: T) -> Ticket {
        self.latest += 1;
        self.pending = Some(value);
        Ticket(self.latest)
    }

    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 != self.latest {
            return None;
        }
        self.pending.take()
    }

    /// Drops the pending value; outstanding tickets become no-ops.
    pub fn cancel(&mut self) {
        self.latest += 1;
        self.pending = None;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Returns a callback that commits its argument to `on_commit` once no new
/// call has arrived for `delay_ms`. Each call cancels and restarts the timer.
pub(crate) fn use_debounced<T>(delay_ms: u32, on_commit: Callback<T>) -> Callback<T>
where
    T: Send + Sync + 'static,
{
    let debouncer: StoredValue<Debouncer<T>, LocalStorage> =
        StoredValue::new_local(Debouncer::default());
    let timer: StoredValue<Option<Timeout>, LocalStorage> = StoredValue::new_local(None);

    on_cleanup(move || {
        let _ = timer.try_update_value(|t| *t = None);
        let _ = debouncer.try_update_value(|d| d.cancel());
    });

    Callback::new(move |value: T| {
        let Some(ticket) = debouncer.try_update_value(|d| d.push(value)) else {
            return;
        };
        // Dropping the previous Timeout clears it.
        timer.set_value(Some(Timeout::new(delay_ms, move || {
            let committed = debouncer.try_update_value(|d| d.fire(ticket)).flatten();
            if let Some(v) = committed {
                on_commit.run(v);
            }
        })));
    })
}
