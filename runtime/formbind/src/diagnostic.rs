//! Non-fatal, field-level problems and where they go.
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::Level;
use tracing_log_error::log_error;

use crate::errors::FieldError;

#[derive(Debug)]
#[non_exhaustive]
/// A problem that occurred while binding a single form key.
///
/// The key is skipped (or, for sequences, the element at `index`), and binding
/// continues with the remaining keys.
pub struct Diagnostic {
    /// The flat form key, as received.
    pub key: String,
    /// The raw value that couldn't be bound, if the problem is value-specific.
    pub value: Option<String>,
    /// The position of the offending value, for sequence fields.
    pub index: Option<usize>,
    /// What went wrong.
    pub error: FieldError,
}

impl Diagnostic {
    pub fn new(key: impl Into<String>, error: impl Into<FieldError>) -> Self {
        Self {
            key: key.into(),
            value: None,
            index: None,
            error: error.into(),
        }
    }

    /// Attach the offending raw value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach the position of the offending value within its sequence.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.key)?;
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        if let Some(value) = &self.value {
            write!(f, " = {value:?}")?;
        }
        write!(f, ": {}", self.error)
    }
}

/// The destination of [`Diagnostic`]s emitted while binding.
///
/// Implementations must not block and must not fail.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, diagnostic: Diagnostic);
}

impl<S> DiagnosticSink for &S
where
    S: DiagnosticSink + ?Sized,
{
    fn warn(&self, diagnostic: Diagnostic) {
        (**self).warn(diagnostic)
    }
}

impl<S> DiagnosticSink for Arc<S>
where
    S: DiagnosticSink + ?Sized,
{
    fn warn(&self, diagnostic: Diagnostic) {
        (**self).warn(diagnostic)
    }
}

#[derive(Debug, Default, Clone, Copy)]
/// Emit every diagnostic as a `WARN`-level `tracing` event.
///
/// This is the default sink.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, diagnostic: Diagnostic) {
        let Diagnostic {
            key,
            value,
            index,
            error,
        } = diagnostic;
        log_error!(
            error,
            level: Level::WARN,
            form.key = %key,
            form.value = ?value,
            form.index = ?index,
            "Failed to bind a form field"
        );
    }
}

#[derive(Debug, Default)]
/// Keep every diagnostic in memory.
///
/// Useful to render field errors back to the user, or to assert on them in tests.
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all the diagnostics collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// The number of diagnostics collected so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A panic while holding the lock can't leave the vector in an invalid state.
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}
