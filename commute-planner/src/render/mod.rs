//! Output formatting for the commute table.

mod latex;
mod table;
mod text;

use std::fmt;
use std::str::FromStr;

use crate::planner::CommuteTable;

pub use latex::latex_escape;
pub use table::{ALIGNMENT, Align, HEADERS, trip_row};

/// Errors from rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unsupported output format {0:?} (expected \"text\" or \"latex\")")]
    UnsupportedFormat(String),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text tables
    #[default]
    Text,
    /// A standalone LaTeX document
    Latex,
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "latex" => Ok(OutputFormat::Latex),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Latex => f.write_str("latex"),
        }
    }
}

/// Render both directions of the table in the requested format.
pub fn render(format: OutputFormat, table: &CommuteTable) -> Result<String, RenderError> {
    match format {
        OutputFormat::Text => Ok(text::render(
            &table.home_to_office,
            &table.office_to_home,
        )),
        OutputFormat::Latex => Ok(latex::render(
            &table.home_to_office,
            &table.office_to_home,
        )?),
    }
}
