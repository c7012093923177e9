//! Walking access to the two commute anchors.
//!
//! Home and office are each reachable on foot from a handful of stops. This
//! module provides lookup of the walking time between an anchor and a stop,
//! and the stop positions on a route that an anchor can use.

use std::collections::HashMap;
use std::fmt;

use chrono::Duration;

use crate::domain::{InvalidStopName, StopName};

/// The two fixed locations a commute runs between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Home,
    Office,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Home => f.write_str("home"),
            Anchor::Office => f.write_str("office"),
        }
    }
}

/// A stop an anchor can use, located on a particular route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorStop<'a> {
    /// Position of the stop in the route's stop ordering
    pub index: usize,
    /// The stop itself
    pub stop: &'a StopName,
    /// Walking time between the stop and the anchor
    pub walk: Duration,
}

/// The stops usable for one anchor and their walking times.
///
/// A stop missing from the set cannot be used for this anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorSet {
    /// Map from stop to walk duration in minutes.
    walks: HashMap<StopName, u32>,
}

impl AnchorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from stop names and walking minutes, validating names.
    pub fn from_minutes<'a>(
        entries: impl IntoIterator<Item = (&'a str, u32)>,
    ) -> Result<Self, InvalidStopName> {
        let mut set = Self::new();
        for (stop, minutes) in entries {
            set.insert(StopName::parse(stop)?, minutes);
        }
        Ok(set)
    }

    /// Add a stop with its walking time, replacing any previous entry.
    pub fn insert(&mut self, stop: StopName, duration_minutes: u32) {
        self.walks.insert(stop, duration_minutes);
    }

    /// Get the walking time between the anchor and a stop.
    ///
    /// Returns `None` if the stop is not usable for this anchor.
    pub fn walk_to(&self, stop: &str) -> Option<Duration> {
        self.walks
            .get(stop)
            .map(|mins| Duration::minutes(i64::from(*mins)))
    }

    /// Locate the usable stops on a route, in stop order.
    ///
    /// # Example
    ///
    /// ```
    /// use commute_planner::anchors::AnchorSetBuilder;
    /// use commute_planner::domain::StopName;
    /// use chrono::Duration;
    ///
    /// let home = AnchorSetBuilder::new().add("B", 4).add("Z", 2).build();
    /// let stops: Vec<StopName> = ["A", "B", "C"]
    ///     .iter()
    ///     .map(|s| StopName::parse(s).unwrap())
    ///     .collect();
    ///
    /// let usable = home.positions_in(&stops);
    /// assert_eq!(usable.len(), 1);
    /// assert_eq!(usable[0].index, 1);
    /// assert_eq!(usable[0].walk, Duration::minutes(4));
    /// ```
    pub fn positions_in<'a>(&self, stops: &'a [StopName]) -> Vec<AnchorStop<'a>> {
        stops
            .iter()
            .enumerate()
            .filter_map(|(index, stop)| {
                self.walk_to(stop.as_str())
                    .map(|walk| AnchorStop { index, stop, walk })
            })
            .collect()
    }

    /// Returns the number of usable stops.
    pub fn len(&self) -> usize {
        self.walks.len()
    }

    /// Returns true if no stop is usable.
    pub fn is_empty(&self) -> bool {
        self.walks.is_empty()
    }
}

/// Builder for creating anchor sets.
///
/// Provides a fluent API for adding stops.
#[derive(Debug, Default)]
pub struct AnchorSetBuilder {
    inner: AnchorSet,
}

impl AnchorSetBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop. Blank stop names are skipped.
    pub fn add(mut self, stop: &str, duration_minutes: u32) -> Self {
        if let Ok(stop) = StopName::parse(stop) {
            self.inner.insert(stop, duration_minutes);
        }
        self
    }

    /// Build the anchor set.
    pub fn build(self) -> AnchorSet {
        self.inner
    }
}
