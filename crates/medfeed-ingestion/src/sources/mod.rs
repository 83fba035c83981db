//! Literature source clients.

pub mod pubmed;

use async_trait::async_trait;
use chrono::{Datelike, Local};
use tracing::{debug, instrument};

use crate::extract::{parse_pubmed_xml, ExtractOptions};
use crate::models::ArticleRecord;

/// Widest publication-date window a search may span, in years.
pub const MAX_RECENT_YEARS: u32 = 50;

/// Restricts a search to recently published articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// The current year and the `n - 1` years before it, capped at
    /// [`MAX_RECENT_YEARS`].
    RecentYears(u32),
}

impl DateWindow {
    /// PubMed `[pdat]` clause, e.g. `(2025[pdat] OR 2026[pdat])`.
    pub fn pdat_clause(&self, current_year: i32) -> String {
        match *self {
            DateWindow::RecentYears(n) => {
                let n = n.clamp(1, MAX_RECENT_YEARS) as i32;
                let years: Vec<String> = (current_year - n + 1..=current_year)
                    .map(|y| format!("{y}[pdat]"))
                    .collect();
                format!("({})", years.join(" OR "))
            }
        }
    }
}

/// One search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub term: String,
    pub max_results: usize,
    pub date_window: Option<DateWindow>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, max_results: usize) -> Self {
        Self { term: term.into(), max_results, date_window: None }
    }

    pub fn with_date_window(mut self, window: Option<DateWindow>) -> Self {
        self.date_window = window;
        self
    }

    /// Search term with the date window applied.
    pub fn rendered_term(&self) -> String {
        match self.date_window {
            Some(window) => format!("{} AND {}", self.term, window.pdat_clause(Local::now().year())),
            None => self.term.clone(),
        }
    }
}

/// Identifiers returned by a search, plus the total hit count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub count: usize,
    pub ids: Vec<String>,
}

/// Common interface of the literature database the pipeline reads from.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    /// Search and return matching identifiers, newest first.
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResult>;

    /// Fetch the raw XML document holding every requested record.
    async fn fetch_raw(&self, ids: &[String]) -> anyhow::Result<String>;

    /// Whether the source is using an access key (raises the rate limit).
    fn is_authenticated(&self) -> bool {
        false
    }
}

/// Fetch one batch of identifiers and extract their records.
/// An empty batch returns immediately without touching the source.
#[instrument(skip(source, options), fields(n = ids.len()))]
pub async fn fetch_details(
    source: &dyn LiteratureSource,
    ids: &[String],
    options: &ExtractOptions,
) -> anyhow::Result<Vec<ArticleRecord>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let xml = source.fetch_raw(ids).await?;
    let records = parse_pubmed_xml(&xml, options);
    debug!(requested = ids.len(), extracted = records.len(), "Batch extracted");
    Ok(records)
}
