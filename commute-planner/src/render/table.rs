//! Trip rows shared by every output format.

use crate::domain::Trip;

/// Number of columns in a trip table.
pub const COLUMNS: usize = 7;

/// Column headings; the duration and time columns are unlabeled.
pub const HEADERS: [&str; COLUMNS] = ["Trip", "", "", "Board at", "Line", "", "Descend at"];

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Alignment per column: times and line right, stop names left.
pub const ALIGNMENT: [Align; COLUMNS] = [
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Left,
];

/// The cells of one trip, e.g. `7:55-8:23`, `(28')`, `8:00`, `A`, `12`,
/// `8:20`, `C`.
pub fn trip_row(trip: &Trip) -> [String; COLUMNS] {
    [
        trip.window(),
        format!("({}')", trip.duration().num_minutes()),
        trip.board_time.to_string(),
        trip.board_stop.to_string(),
        trip.line.to_string(),
        trip.alight_time.to_string(),
        trip.alight_stop.to_string(),
    ]
}

/// Rows for a list of trips, in order.
pub fn trip_rows(trips: &[Trip]) -> Vec<[String; COLUMNS]> {
    trips.iter().map(trip_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, StopName, Timepoint};

    #[test]
    fn row_cells() {
        let t = |s| Timepoint::parse_hhmm(s).unwrap();
        let trip = Trip {
            leave: t("7:55"),
            board_stop: StopName::parse("A").unwrap(),
            board_time: t("8:00"),
            line: LineId::parse("12").unwrap(),
            alight_stop: StopName::parse("C").unwrap(),
            alight_time: t("8:20"),
            arrive: t("8:23"),
        };

        assert_eq!(
            trip_row(&trip),
            ["7:55-8:23", "(28')", "8:00", "A", "12", "8:20", "C"].map(String::from)
        );
    }

    #[test]
    fn duration_spans_midnight() {
        let t = |s| Timepoint::parse_hhmm(s).unwrap();
        let trip = Trip {
            leave: t("23:45"),
            board_stop: StopName::parse("A").unwrap(),
            board_time: t("23:50"),
            line: LineId::parse("N1").unwrap(),
            alight_stop: StopName::parse("C").unwrap(),
            alight_time: t("0:10").next_day(),
            arrive: t("0:15").next_day(),
        };

        let row = trip_row(&trip);
        assert_eq!(row[0], "23:45-0:15");
        assert_eq!(row[1], "(30')");
    }
}
