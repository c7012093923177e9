//! Pagination loop over a route+direction's timetable pages.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::RouteDirection;

use super::builder::RunMatrixBuilder;
use super::error::MatrixError;
use super::page::{PageRef, TimetablePage};

/// Trait for fetching timetable pages.
///
/// This abstraction allows the matrix builder to be tested without network
/// access.
// Pages are fetched on the caller's task and never spawned, so the returned
// futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Error returned when a page cannot be fetched.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch and extract the page behind a reference.
    async fn fetch_page(&self, reference: &PageRef) -> Result<TimetablePage, Self::Error>;
}

/// Fetch a route+direction page by page and assemble its run matrix.
///
/// Starts at `first`, follows each page's next reference until there is
/// none. Pages are fetched one after another since each next reference is
/// only known once the current page is read. Any fetch failure aborts.
pub async fn collect_route_direction<S: PageSource>(
    source: &S,
    first: PageRef,
) -> Result<RouteDirection, MatrixError> {
    let mut builder = RunMatrixBuilder::new();
    let mut visited = HashSet::new();
    let mut next = Some(first);

    while let Some(reference) = next {
        if !visited.insert(reference.clone()) {
            return Err(MatrixError::PaginationLoop { reference });
        }

        let page = source
            .fetch_page(&reference)
            .await
            .map_err(|e| MatrixError::Fetch {
                page: builder.page_count(),
                source: Box::new(e),
            })?;

        builder.absorb(&page)?;
        next = page.next;
    }

    debug!(
        pages = builder.page_count(),
        runs = builder.run_count(),
        "collected route+direction"
    );
    builder.finish()
}
