//! Run-to-trip matching.
//!
//! For each run of a classified route+direction, picks the stop to board at
//! (latest feasible departure from the origin anchor) and the stop to get
//! off at (earliest arrival at the destination anchor).

use std::cmp::Ordering;

use tracing::debug;

use crate::anchors::{Anchor, AnchorSet, AnchorStop};
use crate::domain::{Line, LineId, RouteDirection, Run, StopName, Timepoint, Trip};

use super::direction::{Classification, Direction, classify};
use super::rank::{CommuteTable, TripCollector};

/// Error from trip matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Home and office stops overlap on a route+direction
    #[error(
        "line {line}, direction {direction:?}: home and office stops overlap, \
         routes serving both ways are not supported"
    )]
    AmbiguousDirection { line: LineId, direction: String },
}

/// A stop on one run, with its time converted to anchor time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StopCandidate<'a> {
    /// Time at the anchor: leave time for origins, arrival for destinations.
    anchor_time: Timepoint,
    /// Scheduled time at the stop.
    stop_time: Timepoint,
    stop: &'a StopName,
}

impl StopCandidate<'_> {
    /// Compare by anchor time, then scheduled time, then stop name.
    fn compare(&self, other: &Self) -> Ordering {
        self.anchor_time
            .cmp(&other.anchor_time)
            .then_with(|| self.stop_time.cmp(&other.stop_time))
            .then_with(|| self.stop.cmp(other.stop))
    }
}

/// The latest moment one can leave the origin anchor and still catch the run.
fn best_departure<'a>(origin: &[AnchorStop<'a>], run: &Run) -> Option<StopCandidate<'a>> {
    origin
        .iter()
        .filter_map(|s| {
            let time = run.time_at(s.index)?;
            Some(StopCandidate {
                anchor_time: time - s.walk,
                stop_time: time,
                stop: s.stop,
            })
        })
        .max_by(StopCandidate::compare)
}

/// The earliest arrival at the destination anchor from the run.
fn best_arrival<'a>(destination: &[AnchorStop<'a>], run: &Run) -> Option<StopCandidate<'a>> {
    destination
        .iter()
        .filter_map(|s| {
            let time = run.time_at(s.index)?;
            Some(StopCandidate {
                anchor_time: time + s.walk,
                stop_time: time,
                stop: s.stop,
            })
        })
        .min_by(StopCandidate::compare)
}

/// Match one run against the usable origin and destination stops.
///
/// Returns `None` if the run serves none of the origin stops or none of the
/// destination stops.
pub fn match_run(
    line: &LineId,
    origin: &[AnchorStop<'_>],
    destination: &[AnchorStop<'_>],
    run: &Run,
) -> Option<Trip> {
    let board = best_departure(origin, run)?;
    let alight = best_arrival(destination, run)?;

    Some(Trip {
        leave: board.anchor_time,
        board_stop: board.stop.clone(),
        board_time: board.stop_time,
        line: line.clone(),
        alight_stop: alight.stop.clone(),
        alight_time: alight.stop_time,
        arrive: alight.anchor_time,
    })
}

/// Matches timetables against the home and office anchors.
pub struct TripMatcher<'a> {
    home: &'a AnchorSet,
    office: &'a AnchorSet,
}

impl<'a> TripMatcher<'a> {
    /// Create a new matcher.
    pub fn new(home: &'a AnchorSet, office: &'a AnchorSet) -> Self {
        Self { home, office }
    }

    fn anchor(&self, anchor: Anchor) -> &'a AnchorSet {
        match anchor {
            Anchor::Home => self.home,
            Anchor::Office => self.office,
        }
    }

    /// Classify one route+direction and match all its runs.
    ///
    /// Returns `Ok(None)` if the route has no usable stop for one of the
    /// anchors, and an error if the direction is ambiguous. Runs that miss
    /// every origin or every destination stop produce no trip.
    pub fn match_route(
        &self,
        line: &LineId,
        label: &str,
        route: &RouteDirection,
    ) -> Result<Option<(Direction, Vec<Trip>)>, PlanError> {
        let direction = match classify(route, self.home, self.office) {
            Classification::Serves(direction) => direction,
            Classification::Unserved => {
                debug!(
                    line = %line,
                    direction = %label,
                    "route does not reach both anchors, skipping"
                );
                return Ok(None);
            }
            Classification::Ambiguous => {
                return Err(PlanError::AmbiguousDirection {
                    line: line.clone(),
                    direction: label.to_string(),
                });
            }
        };

        let origin = self.anchor(direction.origin()).positions_in(route.stops());
        let destination = self
            .anchor(direction.destination())
            .positions_in(route.stops());

        let trips: Vec<Trip> = route
            .runs()
            .iter()
            .filter_map(|run| match_run(line, &origin, &destination, run))
            .collect();

        debug!(
            line = %line,
            direction = %label,
            serves = %direction,
            runs = route.runs().len(),
            trips = trips.len(),
            "matched route"
        );

        Ok(Some((direction, trips)))
    }

    /// Match every route+direction of every line and build the commute table.
    ///
    /// A line may appear more than once (e.g. fetched for several dates);
    /// identical trips collapse. Fails on the first ambiguous route.
    pub fn plan<'l>(
        &self,
        lines: impl IntoIterator<Item = &'l Line>,
    ) -> Result<CommuteTable, PlanError> {
        let mut collector = TripCollector::new();

        for line in lines {
            for (label, route) in line.directions() {
                if let Some((direction, trips)) = self.match_route(line.id(), label, route)? {
                    for trip in trips {
                        collector.add(direction, trip);
                    }
                }
            }
        }

        Ok(collector.finish())
    }
}

/// Build the commute table for a set of lines.
///
/// Convenience wrapper around [`TripMatcher::plan`].
pub fn plan_commute<'l>(
    lines: impl IntoIterator<Item = &'l Line>,
    home: &AnchorSet,
    office: &AnchorSet,
) -> Result<CommuteTable, PlanError> {
    TripMatcher::new(home, office).plan(lines)
}
