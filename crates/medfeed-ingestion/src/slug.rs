//! URL slugs for stored units.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const MAX_SLUG_LEN: usize = 60;

/// Lowercase, diacritic-free, hyphen-joined slug of at most
/// [`MAX_SLUG_LEN`] characters with no leading or trailing hyphen.
/// Applying it to its own output returns the same slug.
pub fn slugify(title: &str) -> String {
    let folded: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(folded.len());
    for c in folded.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    // Slug is ASCII here, so byte truncation is char-safe.
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_matches('-').to_string()
}

/// Slug of an article, falling back to its PMID when the title has no
/// sluggable characters (e.g. a title written entirely in CJK).
pub fn article_slug(title: &str, identifier: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("pubmed-{}", slugify(identifier))
    } else {
        slug
    }
}
