//! Filesystem content store.
//!
//! Layout: `<root>/<category-slug>/<unit-slug>.mdx`. The pipeline is the
//! only writer and never overwrites a file; the read side serves listings
//! to the rendering layer.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use medfeed_common::{CategorySlug, Result};
use regex::Regex;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::compose::{parse_document, render_document};
use crate::models::{ContentUnit, Post, PostMeta};

pub const UNIT_EXTENSION: &str = "mdx";
const WORDS_PER_MINUTE: usize = 200;

/// Outcome of [`ContentStore::write_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created(PathBuf),
    /// A file with the same slug was already present; nothing was written.
    AlreadyExists,
}

#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, category: CategorySlug) -> PathBuf {
        self.root.join(category.as_str())
    }

    fn unit_path(&self, category: CategorySlug, slug: &str) -> PathBuf {
        self.category_dir(category).join(format!("{slug}.{UNIT_EXTENSION}"))
    }

    // ── Write side ───────────────────────────────────────────────────────────

    /// PMIDs already stored in `category`. Creates the directory when missing.
    pub async fn existing_identifiers(&self, category: CategorySlug) -> Result<HashSet<String>> {
        let dir = self.category_dir(category);
        fs::create_dir_all(&dir).await?;

        let mut ids = HashSet::new();
        for path in unit_files(&dir).await? {
            let content = match fs::read_to_string(&path).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Unreadable unit file, ignored");
                    continue;
                }
            };
            match stored_identifier(&content) {
                Some(id) => {
                    ids.insert(id);
                }
                None => debug!(path = %path.display(), "Unit without pubmedId"),
            }
        }
        Ok(ids)
    }

    pub async fn slug_exists(&self, category: CategorySlug, slug: &str) -> bool {
        fs::try_exists(self.unit_path(category, slug)).await.unwrap_or(false)
    }

    /// Write a unit with create-new semantics.
    pub async fn write_new(&self, unit: &ContentUnit) -> Result<WriteOutcome> {
        let dir = self.category_dir(unit.category());
        fs::create_dir_all(&dir).await?;
        let path = self.unit_path(unit.category(), &unit.slug);

        let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(WriteOutcome::AlreadyExists),
            Err(e) => return Err(e.into()),
        };
        file.write_all(render_document(unit).as_bytes()).await?;
        file.flush().await?;

        debug!(path = %path.display(), "Unit written");
        Ok(WriteOutcome::Created(path))
    }

    // ── Read side ────────────────────────────────────────────────────────────

    async fn read_category(&self, category: CategorySlug) -> Result<Vec<Post>> {
        let dir = self.category_dir(category);
        if !fs::try_exists(&dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        for path in unit_files(&dir).await? {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let slug = format!("{category}/{stem}");
            match read_post(&path, slug).await {
                Ok(post) => posts.push(post),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unparseable unit"),
            }
        }
        Ok(posts)
    }

    /// Every stored unit, newest first.
    pub async fn list_all(&self) -> Result<Vec<PostMeta>> {
        let mut all = Vec::new();
        for category in CategorySlug::ALL {
            all.extend(self.read_category(category).await?.into_iter().map(|p| p.meta));
        }
        sort_newest_first(&mut all);
        Ok(all)
    }

    /// Look up `category/stem`. Unknown categories and missing files yield `None`.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let Some((category, stem)) = slug.split_once('/') else {
            return Ok(None);
        };
        let Ok(category) = category.parse::<CategorySlug>() else {
            return Ok(None);
        };
        if stem.is_empty() || stem.contains(['/', '\\']) || stem.starts_with('.') {
            return Ok(None);
        }

        let path = self.unit_path(category, stem);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        read_post(&path, format!("{category}/{stem}")).await.map(Some)
    }

    pub async fn list_by_category(&self, category: CategorySlug) -> Result<Vec<PostMeta>> {
        let mut metas: Vec<PostMeta> = self
            .read_category(category)
            .await?
            .into_iter()
            .map(|p| p.meta)
            .collect();
        sort_newest_first(&mut metas);
        Ok(metas)
    }

    pub async fn recent(&self, limit: usize) -> Result<Vec<PostMeta>> {
        let mut all = self.list_all().await?;
        all.truncate(limit);
        Ok(all)
    }

    /// Case-insensitive match on title, description or any tag.
    pub async fn search(&self, query: &str) -> Result<Vec<PostMeta>> {
        let needle = query.to_lowercase();
        let hits = self
            .list_all()
            .await?
            .into_iter()
            .filter(|m| {
                let fm = &m.frontmatter;
                fm.title.to_lowercase().contains(&needle)
                    || fm.description.to_lowercase().contains(&needle)
                    || fm.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(hits)
    }
}

/// Estimated reading time at 200 words per minute, never below one minute.
pub fn reading_minutes(content: &str) -> usize {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

async fn unit_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(UNIT_EXTENSION) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

async fn read_post(path: &Path, slug: String) -> Result<Post> {
    let raw = fs::read_to_string(path).await?;
    let (frontmatter, content) = parse_document(&raw)?;
    Ok(Post {
        meta: PostMeta {
            slug,
            frontmatter,
            reading_minutes: reading_minutes(&content),
        },
        content,
    })
}

fn pubmed_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^pubmedId:\s*["']?(\d+)"#).expect("static regex"))
}

/// PMID of a stored document. Falls back to a line scan when the frontmatter
/// does not deserialize (hand-edited files).
fn stored_identifier(content: &str) -> Option<String> {
    match parse_document(content) {
        Ok((fm, _)) => fm.pubmed_id,
        Err(_) => pubmed_id_re().captures(content).map(|c| c[1].to_string()),
    }
}

fn sort_newest_first(metas: &mut [PostMeta]) {
    metas.sort_by(|a, b| {
        b.frontmatter
            .date
            .cmp(&a.frontmatter.date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}
