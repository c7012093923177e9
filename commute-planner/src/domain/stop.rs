//! Stop and line identifier types.

use std::borrow::Borrow;
use std::fmt;

/// Error returned when parsing an empty stop name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop name: must not be empty")]
pub struct InvalidStopName;

/// Error returned when parsing a blank line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line identifier {input:?}: must not be blank")]
pub struct InvalidLineId {
    input: String,
}

/// The name of a stop, as printed in the operator's timetable.
///
/// Names are opaque: two stops are the same stop only if their names match
/// exactly after surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use commute_planner::domain::StopName;
///
/// let stop = StopName::parse("  Gare Routière ").unwrap();
/// assert_eq!(stop.as_str(), "Gare Routière");
///
/// assert!(StopName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopName(String);

impl StopName {
    /// Parse a stop name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopName> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStopName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StopName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopName({})", self.0)
    }
}

impl fmt::Display for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bus line identifier as the operator publishes it (e.g. "12", "A1",
/// "12 bis").
///
/// The identifier is passed to the operator's line search as typed, so any
/// non-blank text is accepted. Surrounding whitespace is trimmed.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(String);

impl LineId {
    /// Parse a line identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use commute_planner::domain::LineId;
    ///
    /// assert_eq!(LineId::parse("12").unwrap().as_str(), "12");
    /// assert!(LineId::parse("A1").is_ok());
    /// assert_eq!(LineId::parse(" 12 bis ").unwrap().as_str(), "12 bis");
    /// assert!(LineId::parse("  ").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidLineId {
                input: s.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
