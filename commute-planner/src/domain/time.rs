//! Timetable time handling.
//!
//! Operator timetables print times as "HH:MM" strings with no date. This
//! module provides a time-of-day type that still orders correctly around
//! midnight, so that walking buffers and overnight runs never wrap around.

use chrono::Duration;
use std::fmt;
use std::ops::{Add, Sub};

/// Minutes in one service day.
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A scheduled time of day with minute granularity.
///
/// Stored as a signed offset from the midnight that opens the service day.
/// Times parsed from a timetable fall in `0:00..=23:59`; arithmetic may move
/// them before midnight (leaving home at 23:55 to catch a 0:02 bus) or past
/// it (a run arriving at 0:10 the next day), and ordering stays chronological.
///
/// Displays as `H:MM` without a leading zero on the hour.
///
/// # Examples
///
/// ```
/// use commute_planner::domain::Timepoint;
/// use chrono::Duration;
///
/// let bus = Timepoint::parse_hhmm("08:05").unwrap();
/// assert_eq!(bus.to_string(), "8:05");
///
/// let leave = bus - Duration::minutes(10);
/// assert_eq!(leave.to_string(), "7:55");
/// assert!(leave < bus);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timepoint {
    minutes: i64,
}

impl Timepoint {
    /// Create a time on the service day from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self {
            minutes: i64::from(hour) * 60 + i64::from(minute),
        })
    }

    /// Parse a time from "H:MM" or "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use commute_planner::domain::Timepoint;
    ///
    /// assert!(Timepoint::parse_hhmm("00:00").is_ok());
    /// assert!(Timepoint::parse_hhmm("9:05").is_ok());
    /// assert!(Timepoint::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(Timepoint::parse_hhmm("0905").is_err());
    /// assert!(Timepoint::parse_hhmm("9:5").is_err());
    /// assert!(Timepoint::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let (hours, minutes) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hours.is_empty() || hours.len() > 2 {
            return Err(TimeError::new("expected one or two hour digits"));
        }
        if minutes.len() != 2 {
            return Err(TimeError::new("expected two minute digits"));
        }

        let hour = parse_digits(hours).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute =
            parse_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(hour, minute)
    }

    /// Returns the hour on a 24-hour clock (0-23).
    pub fn hour(&self) -> u32 {
        // rem_euclid keeps the value in 0..1440, so the cast cannot truncate
        (self.minutes.rem_euclid(MINUTES_PER_DAY) / 60) as u32
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        (self.minutes.rem_euclid(60)) as u32
    }

    /// Whole days between the service day's opening midnight and this time.
    ///
    /// Negative before that midnight, positive after the following one.
    pub fn day_offset(&self) -> i64 {
        self.minutes.div_euclid(MINUTES_PER_DAY)
    }

    /// The same clock time one day later.
    pub fn next_day(self) -> Self {
        Self {
            minutes: self.minutes + MINUTES_PER_DAY,
        }
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        Duration::minutes(self.minutes - other.minutes)
    }
}

impl Add<Duration> for Timepoint {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            minutes: self.minutes.saturating_add(rhs.num_minutes()),
        }
    }
}

impl Sub<Duration> for Timepoint {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self {
            minutes: self.minutes.saturating_sub(rhs.num_minutes()),
        }
    }
}

impl fmt::Debug for Timepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day_offset() {
            0 => write!(f, "Timepoint({self})"),
            days => write!(f, "Timepoint({self} {days:+}d)"),
        }
    }
}

impl fmt::Display for Timepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

/// Parse a string of ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    s.chars().try_fold(0u32, |acc, c| Some(acc * 10 + c.to_digit(10)?))
}

/// Threshold for detecting midnight rollover along a run.
///
/// If a time appears more than 6 hours before the previous time in the
/// sequence, we assume it has rolled over to the next day.
const ROLLOVER_THRESHOLD_MINUTES: i64 = 6 * 60;

/// Assign days to a run's times for services that cross midnight.
///
/// Timetables print every time on a 24-hour clock, so a run leaving at
/// 23:50 and reaching its last stop at 0:15 appears to go backwards. Walking
/// the run in stop order, a time more than 6 hours earlier than the previous
/// present time is moved to the next day. Absent entries are preserved and do
/// not reset the comparison.
///
/// # Examples
///
/// ```
/// use commute_planner::domain::{Timepoint, sequence_with_rollover};
///
/// let t = |s| Some(Timepoint::parse_hhmm(s).unwrap());
/// let run = sequence_with_rollover([t("23:40"), None, t("00:15")]);
///
/// assert_eq!(run[0].unwrap().day_offset(), 0);
/// assert!(run[1].is_none());
/// assert_eq!(run[2].unwrap().day_offset(), 1);
/// assert!(run[0] < run[2]);
/// ```
pub fn sequence_with_rollover(
    times: impl IntoIterator<Item = Option<Timepoint>>,
) -> Vec<Option<Timepoint>> {
    let mut days = 0;
    let mut prev: Option<Timepoint> = None;

    times
        .into_iter()
        .map(|time_opt| {
            let time = time_opt?;

            if let Some(prev) = prev
                && time.minutes - prev.minutes < -ROLLOVER_THRESHOLD_MINUTES
            {
                days += 1;
            }
            prev = Some(time);

            Some(Timepoint {
                minutes: time.minutes + days * MINUTES_PER_DAY,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Timepoint {
        Timepoint::parse_hhmm(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        let tp = t("00:00");
        assert_eq!(tp.hour(), 0);
        assert_eq!(tp.minute(), 0);

        let tp = t("23:59");
        assert_eq!(tp.hour(), 23);
        assert_eq!(tp.minute(), 59);

        let tp = t("8:05");
        assert_eq!(tp.hour(), 8);
        assert_eq!(tp.minute(), 5);
    }

    #[test]
    fn parse_invalid_format() {
        // Missing colon
        assert!(Timepoint::parse_hhmm("1430").is_err());
        assert!(Timepoint::parse_hhmm("14.30").is_err());

        // Wrong digit counts
        assert!(Timepoint::parse_hhmm(":30").is_err());
        assert!(Timepoint::parse_hhmm("143:00").is_err());
        assert!(Timepoint::parse_hhmm("14:3").is_err());
        assert!(Timepoint::parse_hhmm("14:300").is_err());

        // Non-digit characters
        assert!(Timepoint::parse_hhmm("ab:cd").is_err());
        assert!(Timepoint::parse_hhmm("1a:30").is_err());
        assert!(Timepoint::parse_hhmm("|").is_err());
        assert!(Timepoint::parse_hhmm("").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(Timepoint::parse_hhmm("24:00").is_err());
        assert!(Timepoint::parse_hhmm("12:60").is_err());
    }

    #[test]
    fn display_drops_leading_zero() {
        assert_eq!(t("09:05").to_string(), "9:05");
        assert_eq!(t("00:00").to_string(), "0:00");
        assert_eq!(t("23:59").to_string(), "23:59");
        assert_eq!(t("12:30").to_string(), "12:30");
    }

    #[test]
    fn subtract_across_midnight() {
        let early = t("00:02");
        let leave = early - Duration::minutes(7);

        assert_eq!(leave.to_string(), "23:55");
        assert_eq!(leave.day_offset(), -1);
        assert!(leave < early);
    }

    #[test]
    fn add_across_midnight() {
        let late = t("23:50");
        let arrive = late + Duration::minutes(15);

        assert_eq!(arrive.to_string(), "0:05");
        assert_eq!(arrive.day_offset(), 1);
        assert!(arrive > late);
    }

    #[test]
    fn duration_between() {
        let leave = t("07:55");
        let arrive = t("08:23");

        assert_eq!(arrive.signed_duration_since(leave), Duration::minutes(28));
        assert_eq!(leave.signed_duration_since(arrive), Duration::minutes(-28));
    }

    #[test]
    fn debug_shows_day_offset() {
        assert_eq!(format!("{:?}", t("08:00")), "Timepoint(8:00)");
        assert_eq!(format!("{:?}", t("00:10").next_day()), "Timepoint(0:10 +1d)");
    }

    #[test]
    fn sequence_same_day() {
        let run = sequence_with_rollover([Some(t("10:00")), Some(t("10:30")), Some(t("11:00"))]);
        assert!(run.iter().flatten().all(|tp| tp.day_offset() == 0));
    }

    #[test]
    fn sequence_crosses_midnight() {
        let run = sequence_with_rollover([
            Some(t("23:00")),
            Some(t("23:30")),
            Some(t("00:15")),
            Some(t("01:00")),
        ]);

        assert_eq!(run[0].unwrap().day_offset(), 0);
        assert_eq!(run[1].unwrap().day_offset(), 0);
        assert_eq!(run[2].unwrap().day_offset(), 1);
        assert_eq!(run[3].unwrap().day_offset(), 1);
        assert!(run.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sequence_all_none() {
        let run = sequence_with_rollover([None, None]);
        assert_eq!(run, vec![None, None]);
    }

    #[test]
    fn sequence_exactly_at_threshold() {
        // 6 hours back is not a rollover
        let run = sequence_with_rollover([Some(t("12:00")), Some(t("06:00"))]);
        assert_eq!(run[1].unwrap().day_offset(), 0);

        let run = sequence_with_rollover([Some(t("12:00")), Some(t("05:59"))]);
        assert_eq!(run[1].unwrap().day_offset(), 1);
    }
}
