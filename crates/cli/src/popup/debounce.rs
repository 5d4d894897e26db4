use orgjump_router::SearchTerm;
use std::time::Duration;
use tokio::time::Instant;

/// Keystroke debounce for suggestion lookups.
///
/// Every recorded keystroke, cancellation or explicit lookup bumps the
/// generation. A fetch is tagged with the generation current when it started
/// and its result is only shown while that generation is still current.
#[derive(Debug)]
pub(crate) struct SuggestDebounce {
    delay: Duration,
    generation: u64,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    term: SearchTerm,
    deadline: Instant,
}

impl SuggestDebounce {
    pub(crate) const fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Restarts the quiet period for `term`. `None` (blank input) only cancels.
    pub(crate) fn record(&mut self, term: Option<SearchTerm>, now: Instant) -> Option<Instant> {
        self.generation += 1;
        self.pending = term.map(|term| Pending {
            term,
            deadline: now + self.delay,
        });
        self.next_deadline()
    }

    /// Drops any pending lookup and retires in-flight ones.
    pub(crate) fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.pending = None;
        self.generation
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Hands out the pending term once its quiet period has elapsed.
    pub(crate) fn take_due(&mut self, now: Instant) -> Option<(u64, SearchTerm)> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {}
            _ => return None,
        }
        self.pending
            .take()
            .map(|pending| (self.generation, pending.term))
    }
}
