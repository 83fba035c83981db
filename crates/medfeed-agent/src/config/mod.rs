//! Configuration loading for medfeed.
//! Reads medfeed.toml from the current directory or path in MEDFEED_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use medfeed_common::categories::default_categories;
use medfeed_common::CategorySlug;
use medfeed_ingestion::extract::ExtractOptions;
use medfeed_ingestion::planner::QueryPlan;
use medfeed_ingestion::sources::pubmed::EUTILS_BASE_URL;
use medfeed_ingestion::sources::{DateWindow, MAX_RECENT_YEARS};
use medfeed_ingestion::throttle::Throttle;
use medfeed_ingestion::IngestionJob;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pubmed: PubMedConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub content: ContentConfig,
    /// Per-category search term overrides.
    #[serde(default)]
    pub categories: Vec<CategoryOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubMedConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_per_term_max")]
    pub per_term_max: usize,
    #[serde(default = "default_batch_cap")]
    pub batch_cap: usize,
    #[serde(default = "default_delay_with_key")]
    pub delay_with_key_ms: u64,
    #[serde(default = "default_delay_without_key")]
    pub delay_without_key_ms: u64,
    /// 0 disables the publication-date window. At most `MAX_RECENT_YEARS`.
    #[serde(default = "default_recent_years")]
    pub recent_years: u32,
}

fn default_base_url()          -> String { EUTILS_BASE_URL.to_string() }
fn default_per_term_max()      -> usize  { 3 }
fn default_batch_cap()         -> usize  { 5 }
fn default_delay_with_key()    -> u64    { 100 }
fn default_delay_without_key() -> u64    { 400 }
fn default_recent_years()      -> u32    { 3 }

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            per_term_max: default_per_term_max(),
            batch_cap: default_batch_cap(),
            delay_with_key_ms: default_delay_with_key(),
            delay_without_key_ms: default_delay_without_key(),
            recent_years: default_recent_years(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_true")]
    pub min_abstract_filter: bool,
    #[serde(default = "default_min_abstract_len")]
    pub min_abstract_len: usize,
}

fn default_true()             -> bool  { true }
fn default_min_abstract_len() -> usize { 100 }

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_abstract_filter: default_true(),
            min_abstract_len: default_min_abstract_len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_content_root")]
    pub root: PathBuf,
}

fn default_content_root() -> PathBuf { PathBuf::from("content/posts") }

impl Default for ContentConfig {
    fn default() -> Self {
        Self { root: default_content_root() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOverride {
    pub slug: CategorySlug,
    pub search_terms: Vec<String>,
}


impl Config {
    /// Load configuration from medfeed.toml.
    /// Checks MEDFEED_CONFIG env var first, then current directory. A missing
    /// file yields the defaults. `PUBMED_API_KEY` overrides the file's key.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("MEDFEED_CONFIG")
            .unwrap_or_else(|_| "medfeed.toml".to_string());

        let config = Self::load_from(Path::new(&path))?;
        Ok(config.with_api_key(std::env::var("PUBMED_API_KEY").ok()))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(
                "Config file not found: {}; using defaults. \
                 Copy medfeed.example.toml to medfeed.toml to customise.",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Replace the API key when `key` is set and non-blank.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.pubmed.api_key = Some(key);
        }
        self
    }

    /// Build the job handed to the pipeline.
    pub fn to_job(&self) -> anyhow::Result<IngestionJob> {
        let p = &self.pubmed;
        if p.per_term_max == 0 || p.batch_cap == 0 {
            anyhow::bail!("pubmed.per_term_max and pubmed.batch_cap must be at least 1");
        }
        if p.recent_years > MAX_RECENT_YEARS {
            anyhow::bail!("pubmed.recent_years must be at most {MAX_RECENT_YEARS}");
        }

        let mut categories = default_categories();
        for o in &self.categories {
            if o.search_terms.is_empty() {
                anyhow::bail!("category override for {} has no search terms", o.slug);
            }
            if let Some(c) = categories.iter_mut().find(|c| c.slug == o.slug) {
                c.search_terms = o.search_terms.clone();
            }
        }

        Ok(IngestionJob {
            categories,
            plan: QueryPlan {
                per_term_max: p.per_term_max,
                batch_cap: p.batch_cap,
                date_window: (p.recent_years > 0).then_some(DateWindow::RecentYears(p.recent_years)),
            },
            extract: ExtractOptions {
                min_abstract_len: self
                    .extract
                    .min_abstract_filter
                    .then_some(self.extract.min_abstract_len),
            },
            throttle: Throttle::new(
                Duration::from_millis(p.delay_with_key_ms),
                Duration::from_millis(p.delay_without_key_ms),
            ),
        })
    }
}
