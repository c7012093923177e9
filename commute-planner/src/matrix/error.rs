//! Run matrix error types.

use crate::domain::{DomainError, InvalidStopName, TimeError};

/// Errors while assembling a route+direction from timetable pages.
///
/// All of these are fatal for the route+direction being built; none are
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// A page has a different number of stop rows than the stop ordering
    #[error("page {page}: {rows} timetable rows for {stops} stops")]
    StructuralMismatch {
        page: usize,
        stops: usize,
        rows: usize,
    },

    /// Rows on one page disagree on the number of runs
    #[error("page {page}: row {row} has {found} cells, expected {expected}")]
    RaggedPage {
        page: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A continuation page lists a different stop ordering
    #[error("page {page}: stop ordering differs from the first page")]
    StopOrderingChanged { page: usize },

    /// A stop name cell is blank
    #[error("page {page}: stop {index} has a blank name")]
    InvalidStopName {
        page: usize,
        index: usize,
        #[source]
        source: InvalidStopName,
    },

    /// A cell is neither a time nor the no-service marker
    #[error("page {page}: cell {cell:?} at stop {stop} is not a time")]
    InvalidTime {
        page: usize,
        stop: usize,
        cell: String,
        #[source]
        source: TimeError,
    },

    /// A "next page" reference points back to a page already read
    #[error("pagination loops back to {reference}")]
    PaginationLoop { reference: String },

    /// Fetching a page failed
    #[error("failed to fetch page {page}")]
    Fetch {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The assembled matrix violates a timetable invariant
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MatrixError::StructuralMismatch {
            page: 2,
            stops: 14,
            rows: 13,
        };
        assert_eq!(err.to_string(), "page 2: 13 timetable rows for 14 stops");

        let err = MatrixError::RaggedPage {
            page: 0,
            row: 3,
            expected: 8,
            found: 7,
        };
        assert_eq!(err.to_string(), "page 0: row 3 has 7 cells, expected 8");

        let err = MatrixError::PaginationLoop {
            reference: "http://example.test/p1".into(),
        };
        assert_eq!(
            err.to_string(),
            "pagination loops back to http://example.test/p1"
        );
    }

    #[test]
    fn invalid_time_keeps_source() {
        use std::error::Error;

        let source = crate::domain::Timepoint::parse_hhmm("8h00").unwrap_err();
        let err = MatrixError::InvalidTime {
            page: 1,
            stop: 4,
            cell: "8h00".into(),
            source,
        };

        assert_eq!(err.to_string(), "page 1: cell \"8h00\" at stop 4 is not a time");
        assert!(err.source().is_some());
    }
}
