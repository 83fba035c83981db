//! ArticleRecord → ContentUnit composition and the on-disk document format.
//!
//! A stored document is a YAML frontmatter block between `---` fences
//! followed by a markdown body. Frontmatter values are written as
//! double-quoted scalars so dates and PMIDs are never read back as
//! non-strings.

use medfeed_common::{CategorySlug, MedfeedError};
use serde_json::Value;

use crate::models::{ArticleRecord, ContentUnit, PostFrontmatter};
use crate::slug::article_slug;

/// Characters of abstract kept in the description.
pub const DESCRIPTION_CHARS: usize = 250;
const AUTHOR_SUMMARY_LEN: usize = 3;
const MAX_TAGS: usize = 5;

/// Build the unit persisted for `record` in `category`.
pub fn compose_unit(record: &ArticleRecord, category: CategorySlug) -> ContentUnit {
    let frontmatter = PostFrontmatter {
        title: record.title.clone(),
        description: description(record),
        date: record.publication_date.clone(),
        category,
        image: None,
        author: author_summary(&record.authors),
        pubmed_id: Some(record.identifier.clone()),
        journal: Some(record.journal.clone()).filter(|j| !j.is_empty()),
        doi: record.doi.clone(),
        tags: record.keywords.iter().take(MAX_TAGS).cloned().collect(),
    };

    ContentUnit {
        slug: article_slug(&record.title, &record.identifier),
        frontmatter,
        body: compose_body(record),
    }
}

/// First [`DESCRIPTION_CHARS`] characters of the label-free abstract plus `...`.
pub fn description(record: &ArticleRecord) -> String {
    let plain = record.abstract_plain();
    let cut: String = plain.chars().take(DESCRIPTION_CHARS).collect();
    format!("{}...", cut.trim_end())
}

/// `A, B, C et al.` style author line; `None` without authors.
pub fn author_summary(authors: &[String]) -> Option<String> {
    if authors.is_empty() {
        return None;
    }
    let mut summary = authors
        .iter()
        .take(AUTHOR_SUMMARY_LEN)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if authors.len() > AUTHOR_SUMMARY_LEN {
        summary.push_str(" et al.");
    }
    Some(summary)
}

fn compose_body(record: &ArticleRecord) -> String {
    let summary = record
        .abstract_sections
        .iter()
        .map(|s| match &s.label {
            Some(label) => format!("**{label}:** {}", s.text),
            None => s.text.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let pubmed_url = record.pubmed_url();
    let mut info = vec![
        format!("- **Revista:** {}", record.journal),
        format!("- **Fecha de publicación:** {}", record.publication_date),
        format!("- **Autores:** {}", record.authors.join(", ")),
    ];
    if let Some(doi) = &record.doi {
        info.push(format!("- **DOI:** [{doi}](https://doi.org/{doi})"));
    }
    info.push(format!("- **PubMed ID:** [{}]({pubmed_url})", record.identifier));

    format!(
        "## Resumen\n\n{summary}\n\n\
         ## Información del artículo\n\n{info}\n\n\
         ## Referencias\n\n\
         Este artículo fue obtenido automáticamente desde [PubMed]({pubmed_url}), \
         la base de datos de literatura biomédica del National Center for \
         Biotechnology Information (NCBI).\n",
        info = info.join("\n"),
    )
}

// ── Document format ───────────────────────────────────────────────────────────

fn quoted(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Serialise a unit to its file contents.
pub fn render_document(unit: &ContentUnit) -> String {
    let fm = &unit.frontmatter;
    let mut lines = vec![
        format!("title: {}", quoted(&fm.title)),
        format!("description: {}", quoted(&fm.description)),
        format!("date: {}", quoted(&fm.date)),
        format!("category: {}", quoted(fm.category.as_str())),
    ];
    let optional = [
        ("image", &fm.image),
        ("pubmedId", &fm.pubmed_id),
        ("author", &fm.author),
        ("journal", &fm.journal),
        ("doi", &fm.doi),
    ];
    for (key, value) in optional {
        if let Some(v) = value {
            lines.push(format!("{key}: {}", quoted(v)));
        }
    }
    lines.push(format!("tags: {}", Value::from(fm.tags.clone())));

    format!("---\n{}\n---\n\n{}", lines.join("\n"), unit.body)
}

/// Split `---` fenced frontmatter from the body.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = rest.strip_prefix("---")?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse a stored document into its frontmatter and body.
pub fn parse_document(content: &str) -> Result<(PostFrontmatter, String), MedfeedError> {
    let (yaml, body) = split_frontmatter(content)
        .ok_or(MedfeedError::MissingFrontmatter)?;
    let frontmatter: PostFrontmatter = serde_yaml::from_str(yaml)?;
    Ok((frontmatter, body.trim_start_matches(['\r', '\n']).to_string()))
}
