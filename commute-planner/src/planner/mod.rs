//! Commute trip matcher.
//!
//! Given the consolidated timetables of one or more lines and the home and
//! office anchors, this module answers: "which buses can take me from one
//! anchor to the other, and when do I have to leave?"
//!
//! Each route+direction is classified as carrying the commuter home to
//! office, office to home, or neither. Every run of a classified route then
//! yields at most one trip: board where the departure from the origin anchor
//! is latest, alight where the arrival at the destination anchor is earliest.

mod direction;
mod matcher;
mod rank;

pub use direction::{Classification, Direction, classify};
pub use matcher::{PlanError, TripMatcher, match_run, plan_commute};
pub use rank::{CommuteTable, TripCollector, rank_trips};
