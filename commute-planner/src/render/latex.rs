//! LaTeX document output.

use askama::Template;

use crate::domain::Trip;

use super::table::{ALIGNMENT, Align, HEADERS, trip_rows};

/// Standalone document with one striped table per direction.
#[derive(Template)]
#[template(path = "commute.tex", escape = "none")]
struct CommuteDocument {
    colspec: String,
    header: String,
    /// One entry per direction; each row already escaped and joined
    tables: Vec<Vec<String>>,
}

/// Escape characters that are special in LaTeX text.
pub fn latex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn latex_row<S: AsRef<str>>(cells: impl IntoIterator<Item = S>) -> String {
    cells
        .into_iter()
        .map(|c| latex_escape(c.as_ref()))
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Render both directions as a LaTeX document, home to office first.
pub fn render(home_to_office: &[Trip], office_to_home: &[Trip]) -> Result<String, askama::Error> {
    let colspec = ALIGNMENT
        .iter()
        .map(|a| match a {
            Align::Left => 'l',
            Align::Right => 'r',
        })
        .collect();

    let tables = [home_to_office, office_to_home]
        .into_iter()
        .map(|trips| trip_rows(trips).into_iter().map(latex_row).collect())
        .collect();

    CommuteDocument {
        colspec,
        header: latex_row(HEADERS),
        tables,
    }
    .render()
}
