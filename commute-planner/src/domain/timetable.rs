//! Timetable matrix types.
//!
//! A `RouteDirection` is one line's timetable for one travel direction: an
//! ordered list of stops and the runs (vehicle passages) that serve them.

use std::collections::BTreeMap;

use super::{DomainError, LineId, StopName, Timepoint};

/// One scheduled vehicle passage through a route+direction.
///
/// Holds one entry per stop, in stop order. `None` means the run does not
/// serve that stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    times: Vec<Option<Timepoint>>,
}

impl Run {
    /// Creates a run from its per-stop times.
    pub fn new(times: Vec<Option<Timepoint>>) -> Self {
        Self { times }
    }

    /// Returns the time at a stop position, if the run serves it.
    pub fn time_at(&self, idx: usize) -> Option<Timepoint> {
        self.times.get(idx).copied().flatten()
    }

    /// Returns the number of entries (equal to the route's stop count).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the run has no entries.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// A route in one travel direction: stop ordering plus runs.
///
/// # Invariants
///
/// - Every run has exactly one entry per stop
///
/// Stops are addressed by position. A name may repeat, as on loop routes
/// that start and end at the same terminus.
///
/// # Examples
///
/// ```
/// use commute_planner::domain::{RouteDirection, Run, StopName, Timepoint};
///
/// let stops = vec![StopName::parse("A").unwrap(), StopName::parse("B").unwrap()];
/// let run = Run::new(vec![Some(Timepoint::parse_hhmm("8:00").unwrap()), None]);
///
/// let route = RouteDirection::new(stops, vec![run]).unwrap();
/// assert_eq!(route.stops()[1].as_str(), "B");
/// assert_eq!(route.runs()[0].time_at(1), None);
///
/// // A run must cover every stop
/// let short = Run::new(vec![None]);
/// let stops = vec![StopName::parse("A").unwrap(), StopName::parse("B").unwrap()];
/// assert!(RouteDirection::new(stops, vec![short]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDirection {
    stops: Vec<StopName>,
    runs: Vec<Run>,
}

impl RouteDirection {
    /// Constructs a route+direction, checking run alignment.
    pub fn new(stops: Vec<StopName>, runs: Vec<Run>) -> Result<Self, DomainError> {
        if let Some((run, found)) = runs
            .iter()
            .map(Run::len)
            .enumerate()
            .find(|(_, len)| *len != stops.len())
        {
            return Err(DomainError::MisalignedRun {
                run,
                expected: stops.len(),
                found,
            });
        }

        Ok(Self { stops, runs })
    }

    /// Returns the stop ordering.
    pub fn stops(&self) -> &[StopName] {
        &self.stops
    }

    /// Returns the runs in timetable order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// A bus line: its identifier and a timetable per direction label.
///
/// Direction labels are the operator's route names (typically
/// "Origin - Terminus"). Built once per requested line and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    directions: BTreeMap<String, RouteDirection>,
}

impl Line {
    /// Constructs a line, rejecting repeated direction labels.
    pub fn new(
        id: LineId,
        directions: impl IntoIterator<Item = (String, RouteDirection)>,
    ) -> Result<Self, DomainError> {
        let mut map = BTreeMap::new();
        for (label, route) in directions {
            if map.contains_key(&label) {
                return Err(DomainError::DuplicateDirection(label));
            }
            map.insert(label, route);
        }

        Ok(Self {
            id,
            directions: map,
        })
    }

    /// Returns the line identifier.
    pub fn id(&self) -> &LineId {
        &self.id
    }

    /// Iterates over (direction label, route+direction) pairs.
    pub fn directions(&self) -> impl Iterator<Item = (&str, &RouteDirection)> {
        self.directions
            .iter()
            .map(|(label, route)| (label.as_str(), route))
    }

    /// Returns the total number of runs across all directions.
    pub fn run_count(&self) -> usize {
        self.directions.values().map(|r| r.runs().len()).sum()
    }
}
