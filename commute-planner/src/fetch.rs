//! Fetch lines for service dates.
//!
//! Glues the website client to the matrix builder: every listed
//! route+direction of a line is fetched for a date, page by page, and the
//! results are assembled into one [`Line`]. Independent (line, date) pairs
//! and route+directions are fetched concurrently; the client's semaphore
//! bounds the number of requests in flight.

use chrono::NaiveDate;
use futures::future::try_join_all;
use tracing::info;

use crate::cache::CachedTimetableClient;
use crate::domain::{DomainError, Line, LineId};
use crate::matrix::{MatrixError, PageSource, collect_route_direction};
use crate::source::{RouteLink, SourceError, dated_route_url};

/// Errors while fetching a line.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Route discovery failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A route+direction's pages could not be assembled
    #[error("line {line}, direction {direction:?}: {source}")]
    Matrix {
        line: LineId,
        direction: String,
        #[source]
        source: MatrixError,
    },

    /// The assembled line is inconsistent
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Build a line for one date from its listed route+directions.
pub async fn assemble_line<S: PageSource>(
    source: &S,
    line: &LineId,
    routes: &[RouteLink],
    date: NaiveDate,
) -> Result<Line, FetchError> {
    let directions = try_join_all(routes.iter().map(|route| async move {
        let first = dated_route_url(&route.url, date).to_string();
        let direction = collect_route_direction(source, first)
            .await
            .map_err(|err| FetchError::Matrix {
                line: line.clone(),
                direction: route.label.clone(),
                source: err,
            })?;
        Ok::<_, FetchError>((route.label.clone(), direction))
    }))
    .await?;

    let line = Line::new(line.clone(), directions)?;
    info!(
        line = %line.id(),
        date = %date,
        directions = routes.len(),
        runs = line.run_count(),
        "fetched line"
    );
    Ok(line)
}

/// Fetch one line for one service date.
pub async fn fetch_line(
    client: &CachedTimetableClient,
    line: &LineId,
    date: NaiveDate,
) -> Result<Line, FetchError> {
    let routes = client.find_routes(line).await?;
    assemble_line(client.client(), line, &routes, date).await
}

/// Fetch every line for every date.
///
/// Returns one [`Line`] per (line, date) pair, lines in the given order and
/// dates in the given order within each line. The first failure aborts the
/// whole fetch.
pub async fn fetch_lines(
    client: &CachedTimetableClient,
    lines: &[LineId],
    dates: &[NaiveDate],
) -> Result<Vec<Line>, FetchError> {
    let per_line = try_join_all(lines.iter().map(|line| async move {
        // Look the routes up once so the concurrent dates hit the cache
        client.find_routes(line).await?;
        let fetched = try_join_all(dates.iter().map(|&date| fetch_line(client, line, date))).await?;
        Ok::<_, FetchError>(fetched)
    }))
    .await?;

    Ok(per_line.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use reqwest::Url;

    use crate::matrix::{PageRef, TimetablePage};

    #[derive(Debug, thiserror::Error)]
    #[error("no page at {0}")]
    struct MissingPage(String);

    /// In-memory site keyed by absolute page URL.
    struct MockSite {
        pages: HashMap<String, TimetablePage>,
    }

    impl MockSite {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
            }
        }

        fn add(&mut self, url: &str, stops: &[&str], rows: &[&[&str]], next: Option<&str>) {
            self.pages.insert(
                url.to_string(),
                TimetablePage {
                    stops: stops.iter().map(|s| s.to_string()).collect(),
                    rows: rows
                        .iter()
                        .map(|r| r.iter().map(|c| c.to_string()).collect())
                        .collect(),
                    next: next.map(str::to_string),
                },
            );
        }
    }

    impl PageSource for MockSite {
        type Error = MissingPage;

        async fn fetch_page(&self, reference: &PageRef) -> Result<TimetablePage, MissingPage> {
            self.pages
                .get(reference)
                .cloned()
                .ok_or_else(|| MissingPage(reference.clone()))
        }
    }

    fn route(label: &str, sens: u8) -> RouteLink {
        RouteLink {
            label: label.to_string(),
            url: Url::parse(&format!("https://example.com/r.asp?sens={sens}")).unwrap(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    const OUT: &str =
        "https://example.com/r.asp?sens=1&ladate=05%2F03%2F2024&lheure=00&laminute=00";
    const BACK: &str =
        "https://example.com/r.asp?sens=2&ladate=05%2F03%2F2024&lheure=00&laminute=00";

    #[tokio::test]
    async fn assembles_both_directions() {
        let mut site = MockSite::new();
        site.add(OUT, &["A", "B"], &[&["7:00"], &["7:20"]], Some("https://example.com/p2"));
        site.add("https://example.com/p2", &["A", "B"], &[&["8:00"], &["8:20"]], None);
        site.add(BACK, &["B", "A"], &[&["17:00"], &["17:20"]], None);

        let line = LineId::parse("12").unwrap();
        let result = assemble_line(
            &site,
            &line,
            &[route("A - B", 1), route("B - A", 2)],
            date(),
        )
        .await
        .unwrap();

        assert_eq!(result.id(), &line);
        let runs: Vec<(&str, usize)> = result
            .directions()
            .map(|(label, route)| (label, route.runs().len()))
            .collect();
        assert_eq!(runs, vec![("A - B", 2), ("B - A", 1)]);
        assert_eq!(result.run_count(), 3);
    }

    #[tokio::test]
    async fn matrix_error_names_line_and_direction() {
        let mut site = MockSite::new();
        site.add(OUT, &["A", "B"], &[&["7:00"]], None);

        let err = assemble_line(&site, &LineId::parse("12").unwrap(), &[route("A - B", 1)], date())
            .await
            .unwrap_err();

        match &err {
            FetchError::Matrix {
                line, direction, ..
            } => {
                assert_eq!(line.as_str(), "12");
                assert_eq!(direction, "A - B");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("line 12, direction \"A - B\": "));
    }

    #[tokio::test]
    async fn missing_page_fails_the_line() {
        let site = MockSite::new();

        let err = assemble_line(&site, &LineId::parse("12").unwrap(), &[route("A - B", 1)], date())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FetchError::Matrix {
                source: MatrixError::Fetch { page: 0, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn duplicate_direction_labels_rejected() {
        let mut site = MockSite::new();
        site.add(OUT, &["A"], &[&["7:00"]], None);
        site.add(BACK, &["A"], &[&["8:00"]], None);

        let err = assemble_line(
            &site,
            &LineId::parse("12").unwrap(),
            &[route("Loop", 1), route("Loop", 2)],
            date(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            FetchError::Domain(DomainError::DuplicateDirection(label)) if label == "Loop"
        ));
    }
}
