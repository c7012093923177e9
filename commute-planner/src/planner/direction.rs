//! Travel direction classification.
//!
//! A route+direction serves the commute one way if every stop usable for
//! the origin anchor comes before every stop usable for the destination
//! anchor.

use std::fmt;

use crate::anchors::{Anchor, AnchorSet};
use crate::domain::RouteDirection;

/// Which way a route+direction carries the commuter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    HomeToOffice,
    OfficeToHome,
}

impl Direction {
    /// The anchor the trip starts from.
    pub fn origin(&self) -> Anchor {
        match self {
            Direction::HomeToOffice => Anchor::Home,
            Direction::OfficeToHome => Anchor::Office,
        }
    }

    /// The anchor the trip ends at.
    pub fn destination(&self) -> Anchor {
        match self {
            Direction::HomeToOffice => Anchor::Office,
            Direction::OfficeToHome => Anchor::Home,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.origin(), self.destination())
    }
}

/// Outcome of classifying one route+direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All origin stops precede all destination stops.
    Serves(Direction),
    /// The route has no usable stop for at least one anchor.
    Unserved,
    /// Home and office stop ranges overlap or interleave.
    Ambiguous,
}

/// Classify a route+direction against the two anchors.
///
/// With `home` and `office` the usable stop positions for each anchor:
/// - `max(home) < min(office)` → home to office
/// - `max(office) < min(home)` → office to home
/// - either set empty → unserved (the route cannot connect the anchors)
/// - anything else → ambiguous
///
/// # Examples
///
/// ```
/// use commute_planner::anchors::AnchorSetBuilder;
/// use commute_planner::domain::{RouteDirection, StopName};
/// use commute_planner::planner::{Classification, Direction, classify};
///
/// let stops = ["A", "B", "C", "D"].iter().map(|s| StopName::parse(s).unwrap()).collect();
/// let route = RouteDirection::new(stops, vec![]).unwrap();
///
/// let home = AnchorSetBuilder::new().add("A", 5).add("B", 2).build();
/// let office = AnchorSetBuilder::new().add("D", 3).build();
///
/// assert_eq!(
///     classify(&route, &home, &office),
///     Classification::Serves(Direction::HomeToOffice)
/// );
/// assert_eq!(
///     classify(&route, &office, &home),
///     Classification::Serves(Direction::OfficeToHome)
/// );
/// ```
pub fn classify(route: &RouteDirection, home: &AnchorSet, office: &AnchorSet) -> Classification {
    let (Some((min_home, max_home)), Some((min_office, max_office))) = (
        index_range(route, home),
        index_range(route, office),
    ) else {
        return Classification::Unserved;
    };

    if max_home < min_office {
        Classification::Serves(Direction::HomeToOffice)
    } else if max_office < min_home {
        Classification::Serves(Direction::OfficeToHome)
    } else {
        Classification::Ambiguous
    }
}

/// Lowest and highest stop position usable for an anchor.
fn index_range(route: &RouteDirection, anchor: &AnchorSet) -> Option<(usize, usize)> {
    let usable = anchor.positions_in(route.stops());
    let first = usable.first()?.index;
    let last = usable.last()?.index;
    Some((first, last))
}
