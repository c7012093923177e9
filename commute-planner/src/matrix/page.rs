//! Raw timetable pages, as handed over by the fetch layer.

/// Cell text marking a stop the run does not serve.
pub const NO_SERVICE_MARKER: &str = "|";

/// Reference to a timetable page (an absolute URL for the live site).
pub type PageRef = String;

/// One fetched page of a route+direction timetable.
///
/// `rows[i]` holds the cells for stop `i`, one cell per run shown on this
/// page. Cells are the raw text: `HH:MM`, the no-service marker, or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetablePage {
    /// Stop names in route order. Continuation pages may leave this empty.
    pub stops: Vec<String>,
    /// Per-stop cells, one row per stop.
    pub rows: Vec<Vec<String>>,
    /// Reference to the following time window, if any.
    pub next: Option<PageRef>,
}

impl TimetablePage {
    /// Number of runs on this page (cells in the first row).
    pub fn run_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}
