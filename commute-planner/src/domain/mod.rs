//! Domain types for the commute planner.
//!
//! This module contains the core domain model types that represent
//! validated timetable data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod stop;
mod time;
mod timetable;
mod trip;

pub use error::DomainError;
pub use stop::{InvalidLineId, InvalidStopName, LineId, StopName};
pub use time::{TimeError, Timepoint, sequence_with_rollover};
pub use timetable::{Line, RouteDirection, Run};
pub use trip::Trip;
