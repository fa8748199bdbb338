//! Run module - identity and observable state of a field-generation run

use std::fmt;

/// Unique identifier for a field-generation run, based on UUIDv7
///
/// Used to correlate log lines of one run. UUIDv7 keeps identifiers
/// chronologically sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u128);

impl RunId {
    /// Generate a new UUIDv7-based RunId
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_domain::RunId;
    ///
    /// let first = RunId::new();
    /// let second = RunId::new();
    /// assert_ne!(first, second);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RunId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Observable state of a field-generation run
///
/// Lifecycle:
/// - idle (default): not active, no error
/// - started: active, no error, zero completed fields
/// - failed: inactive, last error recorded
/// - finished: inactive, no error
///
/// `active` stays true from the first field request until either the last
/// field completes or the first failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Whether a run is in progress
    pub active: bool,

    /// Message of the most recent terminal failure
    pub last_error: Option<String>,

    /// Fields delivered to the completion callback in the current or last run
    pub completed_fields: usize,
}

impl RunState {
    /// State at the start of a run
    pub fn started() -> Self {
        Self {
            active: true,
            last_error: None,
            completed_fields: 0,
        }
    }

    /// Alias for `active`
    pub fn is_analyzing(&self) -> bool {
        self.active
    }

    /// Record one more completed field
    pub fn record_completion(&mut self) {
        self.completed_fields += 1;
    }

    /// Terminal failure: inactive with the given message
    pub fn fail(&mut self, message: impl Into<String>) {
        self.active = false;
        self.last_error = Some(message.into());
    }

    /// Terminal success: inactive with no error
    pub fn finish(&mut self) {
        self.active = false;
        self.last_error = None;
    }
}
