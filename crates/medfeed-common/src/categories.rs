//! Content categories of the blog.
//!
//! Each category owns a directory in the content store and an ordered list
//! of PubMed search terms used to find new articles for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MedfeedError;

/// Closed set of category identifiers. Every persisted unit references one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategorySlug {
    #[serde(rename = "ia-odontologia")]
    IaOdontologia,
    #[serde(rename = "ia-medicina")]
    IaMedicina,
    #[serde(rename = "ia-radiologia")]
    IaRadiologia,
    #[serde(rename = "investigacion")]
    Investigacion,
}

impl CategorySlug {
    pub const ALL: [CategorySlug; 4] = [
        CategorySlug::IaOdontologia,
        CategorySlug::IaMedicina,
        CategorySlug::IaRadiologia,
        CategorySlug::Investigacion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategorySlug::IaOdontologia => "ia-odontologia",
            CategorySlug::IaMedicina    => "ia-medicina",
            CategorySlug::IaRadiologia  => "ia-radiologia",
            CategorySlug::Investigacion => "investigacion",
        }
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategorySlug {
    type Err = MedfeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategorySlug::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| MedfeedError::UnknownCategory(s.to_string()))
    }
}

/// Static configuration of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub slug: CategorySlug,
    pub name: String,
    pub description: String,
    /// CSS color used by the rendering layer for badges.
    pub color: String,
    /// Ordered PubMed search terms.
    pub search_terms: Vec<String>,
}

impl Category {
    fn new(slug: CategorySlug, name: &str, description: &str, color: &str, terms: &[&str]) -> Self {
        Self {
            slug,
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            search_terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// The blog's category catalogue, in display order.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            CategorySlug::IaOdontologia,
            "IA en Odontología",
            "Inteligencia artificial aplicada a la salud dental",
            "#3b82f6",
            &[
                "artificial intelligence dentistry",
                "machine learning dental",
                "deep learning oral health",
                "AI dental diagnosis",
            ],
        ),
        Category::new(
            CategorySlug::IaMedicina,
            "IA en Medicina",
            "Aplicaciones de IA en medicina general",
            "#22c55e",
            &[
                "artificial intelligence medicine",
                "AI healthcare",
                "machine learning clinical",
                "deep learning medical",
            ],
        ),
        Category::new(
            CategorySlug::IaRadiologia,
            "IA en Radiología",
            "IA para análisis de imágenes médicas",
            "#a855f7",
            &[
                "AI radiology",
                "deep learning medical imaging",
                "machine learning radiograph",
                "artificial intelligence diagnostic imaging",
            ],
        ),
        Category::new(
            CategorySlug::Investigacion,
            "Investigación",
            "Estudios y avances en investigación con IA",
            "#f97316",
            &[
                "AI clinical research",
                "machine learning diagnosis study",
                "artificial intelligence medical research",
            ],
        ),
    ]
}
