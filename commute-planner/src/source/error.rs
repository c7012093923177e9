//! Timetable website error types.

use crate::domain::LineId;

/// Errors from talking to the operator's timetable website.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// An element the navigation relies on is not on the page
    #[error("{url}: no {what} on page")]
    MissingElement { url: String, what: &'static str },

    /// The search form offers no operator with this name
    #[error("operator {0:?} is not offered by the line search")]
    UnknownOperator(String),

    /// The line search returned no route list
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// A link or configured URL could not be parsed
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
