//! Duplicate detection for composed units.
//!
//! Two keys are checked in order: the PubMed identifier against the
//! identifiers already present in the category, then the slug against the
//! files already on disk.

use std::collections::HashSet;

/// Result of a deduplication check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupResult {
    /// Unit is new, proceed with writing.
    New,
    /// A stored unit already carries this PMID.
    DuplicateIdentifier(String),
    /// A file with this slug already exists in the category.
    DuplicateSlug(String),
}

impl DedupResult {
    pub fn is_new(&self) -> bool {
        matches!(self, DedupResult::New)
    }
}

pub fn check_duplicate(
    slug: &str,
    identifier: &str,
    known_ids: &HashSet<String>,
    slug_taken: bool,
) -> DedupResult {
    if known_ids.contains(identifier) {
        return DedupResult::DuplicateIdentifier(identifier.to_string());
    }
    if slug_taken {
        return DedupResult::DuplicateSlug(slug.to_string());
    }
    DedupResult::New
}
