use crate::model::{api::TallyEntry, envelope::Envelope};

/// Fail-soft reader behind the results screen. Fetches are triggered once on
/// initial display and again on explicit manual refresh; a failed refresh
/// keeps the last good tally on display and is only logged.
#[derive(Debug, Clone, Default)]
pub struct ResultsBoard {
    tally: Vec<TallyEntry>,
    refreshing: bool,
    loaded_once: bool,
}

impl ResultsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tally(&self) -> &[TallyEntry] {
        &self.tally
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Whether any tally has ever been displayed; drives the initial
    /// loading indicator.
    pub fn has_data(&self) -> bool {
        self.loaded_once
    }

    /// Mark a fetch in flight. Returns false when one already is, so the
    /// refresh control debounces itself.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refreshing {
            return false;
        }
        self.refreshing = true;
        true
    }

    /// Settle the in-flight fetch.
    pub fn apply(&mut self, reply: Envelope<Vec<TallyEntry>>) {
        self.refreshing = false;
        match reply {
            Envelope::Success(tally) => {
                self.tally = tally;
                self.loaded_once = true;
            }
            Envelope::Failure(message) => {
                // Stale data beats an error screen; diagnostics only.
                warn!("results refresh failed: {message}");
            }
        }
    }
}
