//! Operator timetable website.
//!
//! Everything that knows about the remote site lives here: navigation to the
//! line search, form submission, route discovery and extraction of the
//! stop/time grid from each timetable page. The output is plain
//! [`TimetablePage`](crate::matrix::TimetablePage)s for the matrix builder.

mod client;
mod error;
pub mod html;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_OPERATOR, RouteLink, TimetableClient, TimetableClientConfig,
    dated_route_url,
};
pub use error::SourceError;
