//! Run matrix construction.
//!
//! The operator publishes each route+direction as a table with one row per
//! stop and one column per run, split across pages that each cover a time
//! window. This module stitches those pages back into a single
//! `RouteDirection`:
//!
//! - Rows are aligned positionally: row `i` of every page belongs to stop `i`
//! - Columns are concatenated in page order
//! - `|` cells become absent times rather than sentinel values
//! - Pagination is forward-only; a failed fetch aborts the route+direction

mod builder;
mod error;
mod page;
mod paginate;

pub use builder::RunMatrixBuilder;
pub use error::MatrixError;
pub use page::{NO_SERVICE_MARKER, PageRef, TimetablePage};
pub use paginate::{PageSource, collect_route_direction};
