//! Data models for the ingestion pipeline and the content store.

use medfeed_common::CategorySlug;
use serde::{Deserialize, Serialize};

/// Maximum number of authors kept per article.
pub const MAX_AUTHORS: usize = 5;
/// Maximum number of keywords kept per article.
pub const MAX_KEYWORDS: usize = 10;

/// One normalised PubMed article. Created per fetch, discarded once it has
/// been turned into a [`ContentUnit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// PubMed identifier (PMID).
    pub identifier: String,
    pub title: String,
    /// Abstract segments joined by a blank line, labelled ones as `LABEL: text`.
    pub abstract_text: String,
    pub abstract_sections: Vec<AbstractSection>,
    pub authors: Vec<String>,
    /// Always `YYYY-MM-DD`.
    pub publication_date: String,
    pub journal: String,
    pub doi: Option<String>,
    pub keywords: Vec<String>,
}

/// One `<AbstractText>` segment of a structured abstract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractSection {
    pub label: Option<String>,
    pub text: String,
}

impl AbstractSection {
    /// Plain-text rendering used in [`ArticleRecord::abstract_text`].
    pub fn render(&self) -> String {
        match &self.label {
            Some(label) => format!("{label}: {}", self.text),
            None => self.text.clone(),
        }
    }
}

impl ArticleRecord {
    /// Abstract text with the segment labels dropped.
    pub fn abstract_plain(&self) -> String {
        self.abstract_sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn pubmed_url(&self) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", self.identifier)
    }
}

/// Frontmatter block of a stored unit. Field names follow what the
/// rendering layer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFrontmatter {
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: CategorySlug,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubmed_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A category-scoped, persisted article. Never mutated once written.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentUnit {
    /// File stem inside the category directory.
    pub slug: String,
    pub frontmatter: PostFrontmatter,
    pub body: String,
}

impl ContentUnit {
    pub fn category(&self) -> CategorySlug {
        self.frontmatter.category
    }

    pub fn identifier(&self) -> Option<&str> {
        self.frontmatter.pubmed_id.as_deref()
    }
}

/// Listing entry of the read contract: frontmatter plus derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// `category/file-stem`.
    pub slug: String,
    #[serde(flatten)]
    pub frontmatter: PostFrontmatter,
    pub reading_minutes: usize,
}

/// A full stored post as returned by `get_by_slug`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,
    pub content: String,
}
