//! Caller-owned handle on the state of a field-generation run

use folio_domain::{RunId, RunState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct RunSlot {
    state: RunState,
    run_id: Option<RunId>,
}

/// Observable state of field-generation runs
///
/// Cloning the handle shares the same state, so a caller can keep one clone
/// for rendering progress while the orchestrator drives another. The handle
/// always reflects the most recent terminal outcome: success clears the last
/// error, failure records it. Use one handle per concurrent run.
///
/// # Examples
///
/// ```
/// use folio_analysis::RunHandle;
///
/// let run = RunHandle::new();
/// assert!(!run.is_analyzing());
/// assert!(run.last_error().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunHandle {
    inner: Arc<Mutex<RunSlot>>,
}

impl RunHandle {
    /// Create an idle handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> RunState {
        self.lock().state.clone()
    }

    /// Whether a run is in progress
    pub fn is_analyzing(&self) -> bool {
        self.lock().state.active
    }

    /// Message of the most recent failure, if the last run failed
    pub fn last_error(&self) -> Option<String> {
        self.lock().state.last_error.clone()
    }

    /// Fields delivered in the current or last run
    pub fn completed_fields(&self) -> usize {
        self.lock().state.completed_fields
    }

    /// Identifier of the current or last run
    pub fn run_id(&self) -> Option<RunId> {
        self.lock().run_id
    }

    pub(crate) fn begin(&self) -> RunId {
        let run_id = RunId::new();
        let mut slot = self.lock();
        slot.state = RunState::started();
        slot.run_id = Some(run_id);
        run_id
    }

    pub(crate) fn record_completion(&self) {
        self.lock().state.record_completion();
    }

    pub(crate) fn fail(&self, message: impl Into<String>) {
        self.lock().state.fail(message);
    }

    pub(crate) fn finish(&self) {
        self.lock().state.finish();
    }

    fn lock(&self) -> MutexGuard<'_, RunSlot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
