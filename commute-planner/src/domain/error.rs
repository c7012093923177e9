//! Domain error types.
//!
//! These errors represent violations of the timetable invariants. They are
//! distinct from fetch and HTML extraction errors.

/// Domain-level errors for timetable construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A run does not have one entry per stop
    #[error("run {run} has {found} entries but the route has {expected} stops")]
    MisalignedRun {
        run: usize,
        expected: usize,
        found: usize,
    },

    /// A line lists the same direction label twice
    #[error("direction {0:?} appears more than once on the line")]
    DuplicateDirection(String),
}
