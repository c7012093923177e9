//! Accumulates timetable pages into a run matrix.

use tracing::trace;

use crate::domain::{
    RouteDirection, Run, StopName, TimeError, Timepoint, sequence_with_rollover,
};

use super::error::MatrixError;
use super::page::{NO_SERVICE_MARKER, TimetablePage};

/// Builds one `RouteDirection` from successive timetable pages.
///
/// The stop ordering comes from the first page. Each page's row `i` is
/// appended to stop `i`'s accumulator, so runs come out in encounter order.
///
/// # Examples
///
/// ```
/// use commute_planner::matrix::{RunMatrixBuilder, TimetablePage};
///
/// let cells = |row: &[&str]| row.iter().map(|c| c.to_string()).collect::<Vec<_>>();
///
/// let mut builder = RunMatrixBuilder::new();
/// builder
///     .absorb(&TimetablePage {
///         stops: vec!["A".into(), "B".into()],
///         rows: vec![cells(&["7:00"]), cells(&["7:15"])],
///         next: None,
///     })
///     .unwrap();
/// builder
///     .absorb(&TimetablePage {
///         stops: vec![],
///         rows: vec![cells(&["8:00", "|"]), cells(&["8:15", "9:15"])],
///         next: None,
///     })
///     .unwrap();
///
/// let route = builder.finish().unwrap();
/// assert_eq!(route.runs().len(), 3);
/// assert_eq!(route.runs()[2].time_at(0), None);
/// ```
#[derive(Debug, Default)]
pub struct RunMatrixBuilder {
    /// Stop ordering, fixed by the first page.
    stops: Option<Vec<StopName>>,
    /// Per-stop times, one entry per run seen so far.
    columns: Vec<Vec<Option<Timepoint>>>,
    /// Pages absorbed so far.
    pages: usize,
}

impl RunMatrixBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's runs.
    ///
    /// The page is validated as a whole before anything is appended, so a
    /// failed page leaves the builder unchanged.
    pub fn absorb(&mut self, page: &TimetablePage) -> Result<(), MatrixError> {
        let page_no = self.pages;

        let stop_count = match &self.stops {
            None => page.stops.len(),
            Some(stops) => {
                if !page.stops.is_empty()
                    && page
                        .stops
                        .iter()
                        .map(|s| s.trim())
                        .ne(stops.iter().map(StopName::as_str))
                {
                    return Err(MatrixError::StopOrderingChanged { page: page_no });
                }
                stops.len()
            }
        };

        if page.rows.len() != stop_count {
            return Err(MatrixError::StructuralMismatch {
                page: page_no,
                stops: stop_count,
                rows: page.rows.len(),
            });
        }

        let run_count = page.run_count();
        let mut parsed = Vec::with_capacity(page.rows.len());
        for (stop, row) in page.rows.iter().enumerate() {
            if row.len() != run_count {
                return Err(MatrixError::RaggedPage {
                    page: page_no,
                    row: stop,
                    expected: run_count,
                    found: row.len(),
                });
            }

            let times = row
                .iter()
                .map(|cell| {
                    parse_cell(cell).map_err(|source| MatrixError::InvalidTime {
                        page: page_no,
                        stop,
                        cell: cell.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push(times);
        }

        if self.stops.is_none() {
            let stops = page
                .stops
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    StopName::parse(name).map_err(|source| MatrixError::InvalidStopName {
                        page: page_no,
                        index,
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            self.columns = vec![Vec::new(); stops.len()];
            self.stops = Some(stops);
        }

        for (column, times) in self.columns.iter_mut().zip(parsed) {
            column.extend(times);
        }
        self.pages += 1;

        trace!(page = page_no, runs = run_count, "absorbed timetable page");
        Ok(())
    }

    /// Number of pages absorbed so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Number of runs accumulated so far.
    pub fn run_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Transpose the accumulated columns into runs and build the route.
    ///
    /// Each run's times are rolled over midnight where the timetable wraps.
    pub fn finish(self) -> Result<RouteDirection, MatrixError> {
        let run_count = self.run_count();
        let stops = self.stops.unwrap_or_default();

        let runs = (0..run_count)
            .map(|run| Run::new(sequence_with_rollover(self.columns.iter().map(|c| c[run]))))
            .collect();

        Ok(RouteDirection::new(stops, runs)?)
    }
}

/// Parse one timetable cell: a time, or absent for the no-service marker.
fn parse_cell(cell: &str) -> Result<Option<Timepoint>, TimeError> {
    let cell = cell.trim();
    if cell.is_empty() || cell == NO_SERVICE_MARKER {
        return Ok(None);
    }
    Timepoint::parse_hhmm(cell).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Option<Timepoint> {
        Some(Timepoint::parse_hhmm(s).unwrap())
    }

    fn page(stops: &[&str], rows: &[&[&str]]) -> TimetablePage {
        TimetablePage {
            stops: stops.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
            next: None,
        }
    }

    #[test]
    fn single_page_transposes_into_runs() {
        let mut builder = RunMatrixBuilder::new();
        builder
            .absorb(&page(
                &["A", "B", "C"],
                &[&["8:00", "9:00"], &["8:10", "|"], &["8:20", "9:20"]],
            ))
            .unwrap();

        let route = builder.finish().unwrap();
        assert_eq!(route.stops().len(), 3);
        assert_eq!(route.runs().len(), 2);
        assert_eq!(
            route.runs()[0],
            Run::new(vec![t("8:00"), t("8:10"), t("8:20")])
        );
        assert_eq!(route.runs()[1], Run::new(vec![t("9:00"), None, t("9:20")]));
    }

    #[test]
    fn pages_concatenate_in_order() {
        let mut builder = RunMatrixBuilder::new();
        builder
            .absorb(&page(&["A", "B"], &[&["6:00"], &["6:30"]]))
            .unwrap();
        builder
            .absorb(&page(&["A", "B"], &[&["7:00", "8:00"], &["7:30", "8:30"]]))
            .unwrap();

        assert_eq!(builder.page_count(), 2);
        assert_eq!(builder.run_count(), 3);

        let route = builder.finish().unwrap();
        let firsts: Vec<_> = route.runs().iter().map(|r| r.time_at(0)).collect();
        assert_eq!(firsts, vec![t("6:00"), t("7:00"), t("8:00")]);
    }

    #[test]
    fn no_service_marker_is_absent() {
        let mut builder = RunMatrixBuilder::new();
        builder
            .absorb(&page(&["A", "C"], &[&["|"], &[" 8:20 "]]))
            .unwrap();

        let route = builder.finish().unwrap();
        assert_eq!(route.runs()[0], Run::new(vec![None, t("8:20")]));
    }

    #[test]
    fn row_count_mismatch_fails() {
        let mut builder = RunMatrixBuilder::new();
        let err = builder
            .absorb(&page(&["A", "B", "C"], &[&["8:00"], &["8:10"]]))
            .unwrap_err();

        assert!(matches!(
            err,
            MatrixError::StructuralMismatch {
                page: 0,
                stops: 3,
                rows: 2
            }
        ));
    }

    #[test]
    fn mismatch_on_later_page_fails() {
        let mut builder = RunMatrixBuilder::new();
        builder
            .absorb(&page(&["A", "B"], &[&["8:00"], &["8:10"]]))
            .unwrap();

        let err = builder.absorb(&page(&[], &[&["9:00"]])).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::StructuralMismatch {
                page: 1,
                stops: 2,
                rows: 1
            }
        ));

        // The failed page left the builder untouched
        assert_eq!(builder.page_count(), 1);
        assert_eq!(builder.run_count(), 1);
    }

    #[test]
    fn ragged_page_fails() {
        let mut builder = RunMatrixBuilder::new();
        let err = builder
            .absorb(&page(&["A", "B"], &[&["8:00", "9:00"], &["8:10"]]))
            .unwrap_err();

        assert!(matches!(
            err,
            MatrixError::RaggedPage {
                row: 1,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn changed_stop_ordering_fails() {
        let mut builder = RunMatrixBuilder::new();
        builder
            .absorb(&page(&["A", "B"], &[&["8:00"], &["8:10"]]))
            .unwrap();

        let err = builder
            .absorb(&page(&["B", "A"], &[&["9:00"], &["9:10"]]))
            .unwrap_err();
        assert!(matches!(err, MatrixError::StopOrderingChanged { page: 1 }));
    }

    #[test]
    fn invalid_cell_fails() {
        let mut builder = RunMatrixBuilder::new();
        let err = builder
            .absorb(&page(&["A", "B"], &[&["8:00"], &["8h10"]]))
            .unwrap_err();

        match err {
            MatrixError::InvalidTime { stop, cell, .. } => {
                assert_eq!(stop, 1);
                assert_eq!(cell, "8h10");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_stop_name_fails() {
        let mut builder = RunMatrixBuilder::new();
        let err = builder
            .absorb(&page(&["A", " "], &[&["8:00"], &["8:10"]]))
            .unwrap_err();
        assert!(matches!(err, MatrixError::InvalidStopName { index: 1, .. }));
    }

    #[test]
    fn loop_route_finishes() {
        let mut builder = RunMatrixBuilder::new();
        builder
            .absorb(&page(
                &["Gare", "Home", "Office", "Gare"],
                &[&["8:00"], &["8:05"], &["8:20"], &["8:30"]],
            ))
            .unwrap();

        let route = builder.finish().unwrap();
        assert_eq!(route.stops().len(), 4);
        assert_eq!(route.stops()[0], route.stops()[3]);
        assert_eq!(route.runs()[0].time_at(3), t("8:30"));
    }

    #[test]
    fn overnight_run_rolls_over() {
        let mut builder = RunMatrixBuilder::new();
        builder
            .absorb(&page(&["A", "B"], &[&["23:50"], &["0:10"]]))
            .unwrap();

        let route = builder.finish().unwrap();
        let run = &route.runs()[0];
        assert!(run.time_at(0) < run.time_at(1));
        assert_eq!(run.time_at(1).unwrap().day_offset(), 1);
    }

    #[test]
    fn empty_builder_finishes_empty() {
        let route = RunMatrixBuilder::new().finish().unwrap();
        assert!(route.stops().is_empty());
        assert!(route.runs().is_empty());
    }
}
