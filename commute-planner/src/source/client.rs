//! Timetable website HTTP client.
//!
//! Navigates the operator's public timetable site the way a browser would:
//! index page, line search form, route list, then one timetable page per
//! time window. Holds the cookie-carrying session for the whole invocation.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::{RequestBuilder, Url};
use scraper::Html;
use tokio::sync::Semaphore;
use tracing::{debug, trace};

use crate::domain::LineId;
use crate::matrix::{PageRef, PageSource, TimetablePage};

use super::error::SourceError;
use super::html::{self, FormMethod};

/// Default site root.
pub const DEFAULT_BASE_URL: &str = "https://www.pacamobilite.fr";

/// Operator whose lines are searched unless told otherwise.
pub const DEFAULT_OPERATOR: &str = "Envibus";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Substring identifying the link from the index to the line search.
const SEARCH_LINK_MARKER: &str = "horaires_ligne";

/// Configuration for the timetable client.
#[derive(Debug, Clone)]
pub struct TimetableClientConfig {
    /// Site root; `index.asp` is resolved against it
    pub base_url: String,
    /// Operator name as shown in the search form
    pub operator: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TimetableClientConfig {
    /// Create a config with the default site and operator.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            operator: DEFAULT_OPERATOR.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the operator to search lines for.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TimetableClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One route+direction listed for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLink {
    /// Direction label as shown by the operator
    pub label: String,
    /// Absolute link to the route's timetable
    pub url: Url,
}

/// Client for the operator's timetable website.
///
/// Keeps cookies across requests, as the site ties search results to the
/// session. Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct TimetableClient {
    http: reqwest::Client,
    base_url: Url,
    operator: String,
    semaphore: Arc<Semaphore>,
}

impl TimetableClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TimetableClientConfig) -> Result<Self, SourceError> {
        let base_url = parse_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            operator: config.operator,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// The operator lines are searched for.
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Send a request and return the final URL (after redirects) and body.
    async fn send(&self, request: RequestBuilder) -> Result<(Url, String), SourceError> {
        // The semaphore is never closed
        let _permit = self.semaphore.acquire().await.ok();

        let response = request.send().await?;
        let url = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        trace!(url = %url, bytes = body.len(), "fetched page");
        Ok((url, body))
    }

    async fn get(&self, url: Url) -> Result<(Url, String), SourceError> {
        self.send(self.http.get(url)).await
    }

    /// Search for a line and list its route+directions.
    ///
    /// Walks from the site index to the line search, submits it for `line`
    /// and the configured operator, and returns the listed routes with
    /// absolute URLs.
    pub async fn find_routes(&self, line: &LineId) -> Result<Vec<RouteLink>, SourceError> {
        let index = join(&self.base_url, "index.asp")?;
        let (index, body) = self.get(index).await?;

        let link = html::find_link(&Html::parse_document(&body), SEARCH_LINK_MARKER).ok_or_else(
            || SourceError::MissingElement {
                url: index.to_string(),
                what: "timetable search link",
            },
        )?;
        let (search_page, body) = self.get(join(&index, &link)?).await?;

        let (form, operator_id) = {
            let doc = Html::parse_document(&body);
            let form = html::search_form(&doc).ok_or_else(|| SourceError::MissingElement {
                url: search_page.to_string(),
                what: "line search form",
            })?;
            let operator_id = html::operator_id(&doc, &self.operator)
                .ok_or_else(|| SourceError::UnknownOperator(self.operator.clone()))?;
            (form, operator_id)
        };

        let mut form = form;
        form.set("keywordsNumber", line.as_str());
        form.set("operator_id", operator_id);

        let action = if form.action.is_empty() {
            search_page.clone()
        } else {
            join(&search_page, &form.action)?
        };
        debug!(line = %line, operator = %self.operator, action = %action, "submitting line search");

        let request = match form.method {
            FormMethod::Get => self.http.get(action).query(&form.fields),
            FormMethod::Post => self.http.post(action).form(&form.fields),
        };
        let (results, body) = self.send(request).await?;

        let links = html::route_links(&Html::parse_document(&body))
            .ok_or_else(|| SourceError::LineNotFound(line.clone()))?;

        let routes = links
            .into_iter()
            .map(|(label, href)| {
                Ok(RouteLink {
                    label,
                    url: join(&results, &href)?,
                })
            })
            .collect::<Result<Vec<_>, SourceError>>()?;

        debug!(line = %line, routes = routes.len(), "found route+directions");
        Ok(routes)
    }
}

impl PageSource for TimetableClient {
    type Error = SourceError;

    /// Fetch one timetable page; its next reference comes back absolute.
    async fn fetch_page(&self, reference: &PageRef) -> Result<TimetablePage, SourceError> {
        let (url, body) = self.get(parse_url(reference)?).await?;

        let mut page = html::timetable_page(&Html::parse_document(&body));
        page.next = match page.next {
            Some(href) => Some(join(&url, &href)?.to_string()),
            None => None,
        };
        Ok(page)
    }
}

/// Point a route link at a service date, starting from midnight.
///
/// Replaces the `ladate`, `lheure` and `laminute` query parameters and keeps
/// every other one in order.
pub fn dated_route_url(link: &Url, date: NaiveDate) -> Url {
    let kept: Vec<(String, String)> = link
        .query_pairs()
        .filter(|(k, _)| !matches!(k.as_ref(), "ladate" | "lheure" | "laminute"))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = link.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(&kept)
        .append_pair("ladate", &date.format("%d/%m/%Y").to_string())
        .append_pair("lheure", "00")
        .append_pair("laminute", "00");
    url
}

fn parse_url(s: &str) -> Result<Url, SourceError> {
    Url::parse(s).map_err(|e| SourceError::InvalidUrl {
        url: s.to_string(),
        reason: e.to_string(),
    })
}

fn join(base: &Url, href: &str) -> Result<Url, SourceError> {
    base.join(href).map_err(|e| SourceError::InvalidUrl {
        url: href.to_string(),
        reason: e.to_string(),
    })
}
