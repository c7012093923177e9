//! HTML extraction for the operator's timetable pages.
//!
//! Pure functions over parsed documents: they find links, read the line
//! search form and pull the stop/time grid out of a timetable page. None of
//! them fetch anything.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::matrix::TimetablePage;

fn selector(s: &str) -> Selector {
    Selector::parse(s).expect("static selector is valid")
}

static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static SEARCH_FORM: LazyLock<Selector> = LazyLock::new(|| selector("form#searchByNumber"));
static NAMED_INPUT: LazyLock<Selector> = LazyLock::new(|| selector("input[name]"));
static NAMED_SELECT: LazyLock<Selector> = LazyLock::new(|| selector("select[name]"));
static OPTION: LazyLock<Selector> = LazyLock::new(|| selector("option"));
static ROUTE_LIST: LazyLock<Selector> = LazyLock::new(|| selector("ul.lig"));
static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li"));
static STOP_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td[id^=\"arret\"]"));
static STOP_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr.row0, tr.row1"));
static TIME_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td.horaire"));
static LATER_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.laterHour[href]"));

/// Element text with surrounding whitespace removed.
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// How a form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

/// A form's target and its current field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    /// The `action` attribute; empty means the page itself
    pub action: String,
    pub method: FormMethod,
    /// Named fields in document order
    pub fields: Vec<(String, String)>,
}

impl SearchForm {
    /// Set a field, replacing its value if already present.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }
}

/// The `href` of the first link whose target contains `needle`.
pub fn find_link(doc: &Html, needle: &str) -> Option<String> {
    doc.select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href.contains(needle))
        .map(str::to_string)
}

/// Read the line search form (`form#searchByNumber`).
///
/// Inputs contribute their `value` (empty if absent); selects contribute the
/// selected option, or the first one.
pub fn search_form(doc: &Html) -> Option<SearchForm> {
    let form = doc.select(&SEARCH_FORM).next()?;

    let method = match form.value().attr("method") {
        Some(m) if m.eq_ignore_ascii_case("post") => FormMethod::Post,
        _ => FormMethod::Get,
    };
    let action = form.value().attr("action").unwrap_or_default().to_string();

    let mut fields = Vec::new();
    for input in form.select(&NAMED_INPUT) {
        let el = input.value();
        if matches!(el.attr("type"), Some("submit" | "button" | "image" | "reset")) {
            continue;
        }
        if let Some(name) = el.attr("name") {
            fields.push((name.to_string(), el.attr("value").unwrap_or_default().to_string()));
        }
    }
    for select in form.select(&NAMED_SELECT) {
        let Some(name) = select.value().attr("name") else {
            continue;
        };
        let chosen = select
            .select(&OPTION)
            .find(|o| o.value().attr("selected").is_some())
            .or_else(|| select.select(&OPTION).next());
        let value = chosen
            .map(|o| {
                o.value()
                    .attr("value")
                    .map(str::to_string)
                    .unwrap_or_else(|| text_of(o))
            })
            .unwrap_or_default();
        fields.push((name.to_string(), value));
    }

    Some(SearchForm {
        action,
        method,
        fields,
    })
}

/// The `value` of the first `<option>` whose text is `operator`.
pub fn operator_id(doc: &Html, operator: &str) -> Option<String> {
    doc.select(&OPTION)
        .find(|o| text_of(*o) == operator)
        .and_then(|o| o.value().attr("value"))
        .map(str::to_string)
}

/// The (label, href) pairs listed for a line after a search.
///
/// Only the first item of the first `ul.lig` list is read; it holds the
/// links for the line that was searched. Returns `None` if there is no such
/// list.
pub fn route_links(doc: &Html) -> Option<Vec<(String, String)>> {
    let list = doc.select(&ROUTE_LIST).next()?;
    let item = list.select(&LIST_ITEM).next()?;

    Some(
        item.select(&LINK)
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                Some((text_of(a), href.to_string()))
            })
            .collect(),
    )
}

fn is_stop_id(id: &str) -> bool {
    id.strip_prefix("arret")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Extract the stop/time grid of one timetable page.
///
/// Stop names come from cells with an `arret<N>` id, one grid row per stop
/// from rows of class `row0`/`row1`, times from their `horaire` cells. The
/// next reference is the raw `href` of the "later" link, unresolved.
pub fn timetable_page(doc: &Html) -> TimetablePage {
    let stops = doc
        .select(&STOP_CELL)
        .filter(|td| td.value().id().is_some_and(is_stop_id))
        .map(text_of)
        .collect();

    let rows = doc
        .select(&STOP_ROW)
        .map(|tr| tr.select(&TIME_CELL).map(text_of).collect())
        .collect();

    let next = doc
        .select(&LATER_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);

    TimetablePage { stops, rows, next }
}
