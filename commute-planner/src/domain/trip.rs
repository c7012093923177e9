//! Trip type.
//!
//! A `Trip` is one anchor-to-anchor journey derived from a single run: walk
//! to a stop, ride the bus, walk from another stop.

use std::cmp::Ordering;

use chrono::Duration;

use super::{LineId, StopName, Timepoint};

/// An anchor-to-anchor journey on one bus.
///
/// Trips are value objects: two trips with identical fields are the same
/// trip, whichever run, line or service date produced them.
///
/// Ordering is chronological by departure from the origin anchor: first by
/// (leave time, board time, board stop), then by (arrive time, alight time,
/// alight stop), then by line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trip {
    /// Latest time to leave the origin anchor
    pub leave: Timepoint,
    /// Stop where the bus is boarded
    pub board_stop: StopName,
    /// Scheduled time at the boarding stop
    pub board_time: Timepoint,
    /// Line the bus runs on
    pub line: LineId,
    /// Stop where the bus is left
    pub alight_stop: StopName,
    /// Scheduled time at the alighting stop
    pub alight_time: Timepoint,
    /// Earliest arrival at the destination anchor
    pub arrive: Timepoint,
}

impl Trip {
    /// Door-to-door duration, walking included.
    pub fn duration(&self) -> Duration {
        self.arrive.signed_duration_since(self.leave)
    }

    /// The departure/arrival window, e.g. `7:55-8:23`.
    pub fn window(&self) -> String {
        format!("{}-{}", self.leave, self.arrive)
    }
}

impl Ord for Trip {
    fn cmp(&self, other: &Self) -> Ordering {
        self.leave
            .cmp(&other.leave)
            .then_with(|| self.board_time.cmp(&other.board_time))
            .then_with(|| self.board_stop.cmp(&other.board_stop))
            .then_with(|| self.arrive.cmp(&other.arrive))
            .then_with(|| self.alight_time.cmp(&other.alight_time))
            .then_with(|| self.alight_stop.cmp(&other.alight_stop))
            .then_with(|| self.line.cmp(&other.line))
    }
}

impl PartialOrd for Trip {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
