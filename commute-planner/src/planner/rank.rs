//! Trip collection, deduplication and ordering.

use std::collections::HashSet;

use crate::domain::Trip;

use super::direction::Direction;

/// The commute options in both directions, each sorted by departure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommuteTable {
    pub home_to_office: Vec<Trip>,
    pub office_to_home: Vec<Trip>,
}

impl CommuteTable {
    /// Total number of trips in both directions.
    pub fn len(&self) -> usize {
        self.home_to_office.len() + self.office_to_home.len()
    }

    /// Returns true if no trip was found in either direction.
    pub fn is_empty(&self) -> bool {
        self.home_to_office.is_empty() && self.office_to_home.is_empty()
    }
}

/// Accumulates trips per direction with set semantics.
///
/// The same trip found through a different line, run or service date
/// collapses into one entry.
#[derive(Debug, Default)]
pub struct TripCollector {
    home_to_office: HashSet<Trip>,
    office_to_home: HashSet<Trip>,
}

impl TripCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trip. Returns false if an identical trip was already present.
    pub fn add(&mut self, direction: Direction, trip: Trip) -> bool {
        match direction {
            Direction::HomeToOffice => self.home_to_office.insert(trip),
            Direction::OfficeToHome => self.office_to_home.insert(trip),
        }
    }

    /// Sort both directions and produce the final table.
    pub fn finish(self) -> CommuteTable {
        CommuteTable {
            home_to_office: rank_trips(self.home_to_office),
            office_to_home: rank_trips(self.office_to_home),
        }
    }
}

/// Sort trips chronologically.
///
/// Ordering is the trip's natural order: departure from the origin anchor
/// first, then boarding, then arrival, then line. Input from
/// [`TripCollector`] is already a set; equal trips from any other iterator
/// are collapsed after sorting.
pub fn rank_trips(trips: impl IntoIterator<Item = Trip>) -> Vec<Trip> {
    let mut trips: Vec<Trip> = trips.into_iter().collect();
    trips.sort();
    trips.dedup();
    trips
}
