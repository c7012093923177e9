//! Plain-text tables.

use crate::domain::Trip;

use super::table::{ALIGNMENT, Align, COLUMNS, HEADERS, trip_rows};

/// Extra width every labeled column gets beyond its heading.
const HEADER_PADDING: usize = 2;

const SEPARATOR: &str = "  ";

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{cell:<width$}"),
        Align::Right => format!("{cell:>width$}"),
    }
}

fn join_line(cells: impl Iterator<Item = String>) -> String {
    cells
        .collect::<Vec<_>>()
        .join(SEPARATOR)
        .trim_end()
        .to_string()
}

/// Render one direction's trips as a plain table.
///
/// A heading line, a dashed rule under each column, then one line per trip.
pub fn render_table(trips: &[Trip]) -> String {
    let rows = trip_rows(trips);

    let mut widths = [0; COLUMNS];
    for (i, w) in widths.iter_mut().enumerate() {
        let cells = rows.iter().map(|r| width(&r[i])).max().unwrap_or(0);
        *w = cells.max(width(HEADERS[i]) + HEADER_PADDING);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_line(
        (0..COLUMNS).map(|i| pad(HEADERS[i], widths[i], ALIGNMENT[i])),
    ));
    lines.push(join_line(widths.iter().map(|&w| "-".repeat(w))));
    for row in &rows {
        lines.push(join_line(
            (0..COLUMNS).map(|i| pad(&row[i], widths[i], ALIGNMENT[i])),
        ));
    }

    lines.join("\n")
}

/// Render both directions, home to office first, separated by a blank line.
pub fn render(home_to_office: &[Trip], office_to_home: &[Trip]) -> String {
    format!(
        "{}\n\n{}",
        render_table(home_to_office),
        render_table(office_to_home)
    )
}
