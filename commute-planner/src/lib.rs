//! Bus commute planner.
//!
//! Consolidates an operator's published timetables for one or more lines
//! into the list of buses that get you from home to the office, and back,
//! with the latest time you can leave and the earliest you will arrive.

pub mod anchors;
pub mod cache;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod matrix;
pub mod planner;
pub mod render;
pub mod source;
