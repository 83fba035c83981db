//! End-to-end ingestion pipeline.
//!
//! Categories are processed one after another. For each category:
//!   1. Scan the store for identifiers already published
//!   2. Plan candidates: search every term, drop known PMIDs, cap the batch
//!   3. Fetch the batch in one request and extract records
//!   4. Compose units, deduplicate by PMID and slug, write new files
//!
//! The pipeline is non-destructive: on errors it logs and continues, and the
//! run as a whole never fails.

use std::collections::HashSet;

use medfeed_common::categories::default_categories;
use medfeed_common::{Category, CategorySlug};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::compose::compose_unit;
use crate::dedup::{check_duplicate, DedupResult};
use crate::extract::ExtractOptions;
use crate::planner::{plan_candidates, QueryPlan};
use crate::sources::{fetch_details, LiteratureSource};
use crate::store::{ContentStore, WriteOutcome};
use crate::throttle::Throttle;

// ── Job config ────────────────────────────────────────────────────────────────

/// Parameters for a single ingestion run.
#[derive(Debug, Clone)]
pub struct IngestionJob {
    /// Processed in order.
    pub categories: Vec<Category>,
    pub plan: QueryPlan,
    pub extract: ExtractOptions,
    pub throttle: Throttle,
}

impl Default for IngestionJob {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            plan: QueryPlan::default(),
            extract: ExtractOptions::default(),
            throttle: Throttle::default(),
        }
    }
}

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CategoryOutcome {
    pub category: CategorySlug,
    /// Identifiers already in the store before the run.
    pub existing: usize,
    pub candidates: usize,
    pub fetched: usize,
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl CategoryOutcome {
    fn new(category: CategorySlug) -> Self {
        Self {
            category,
            existing: 0,
            candidates: 0,
            fetched: 0,
            created: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, msg: String) {
        warn!(category = %self.category, "{}", &msg);
        self.errors.push(msg);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestionSummary {
    pub run_id: Uuid,
    pub categories: Vec<CategoryOutcome>,
    pub total_created: usize,
    pub total_skipped: usize,
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

impl IngestionSummary {
    pub fn outcome(&self, category: CategorySlug) -> Option<&CategoryOutcome> {
        self.categories.iter().find(|c| c.category == category)
    }
}

// ── Pipeline orchestrator ─────────────────────────────────────────────────────

/// Runs every category of `job` against `source`, writing into `store`.
#[instrument(skip_all)]
pub async fn run_ingestion(
    job: &IngestionJob,
    source: &dyn LiteratureSource,
    store: &ContentStore,
) -> IngestionSummary {
    let run_id = Uuid::new_v4();
    let t0 = std::time::Instant::now();
    info!(
        run_id = %run_id,
        categories = job.categories.len(),
        authenticated = source.is_authenticated(),
        root = %store.root().display(),
        "Starting ingestion pipeline"
    );

    let mut summary = IngestionSummary {
        run_id,
        categories: Vec::with_capacity(job.categories.len()),
        total_created: 0,
        total_skipped: 0,
        errors: Vec::new(),
        duration_ms: 0,
    };

    for category in &job.categories {
        let outcome = ingest_category(job, category, source, store).await;
        summary.total_created += outcome.created;
        summary.total_skipped += outcome.skipped;
        summary
            .errors
            .extend(outcome.errors.iter().map(|e| format!("{}: {e}", outcome.category)));
        summary.categories.push(outcome);
    }

    summary.duration_ms = t0.elapsed().as_millis() as u64;

    info!(
        run_id      = %run_id,
        created     = summary.total_created,
        skipped     = summary.total_skipped,
        errors      = summary.errors.len(),
        duration_ms = summary.duration_ms,
        "Ingestion pipeline complete"
    );

    summary
}

#[instrument(skip_all, fields(category = %category.slug))]
async fn ingest_category(
    job: &IngestionJob,
    category: &Category,
    source: &dyn LiteratureSource,
    store: &ContentStore,
) -> CategoryOutcome {
    let mut outcome = CategoryOutcome::new(category.slug);

    // ── 1. Known identifiers ──────────────────────────────────────────────────
    let mut known = match store.existing_identifiers(category.slug).await {
        Ok(ids) => ids,
        Err(e) => {
            outcome.fail(format!("content scan failed: {e}"));
            return outcome;
        }
    };
    outcome.existing = known.len();
    info!(existing = known.len(), terms = category.search_terms.len(), "Processing category");

    // ── 2. Candidates ─────────────────────────────────────────────────────────
    let candidates = plan_candidates(
        source,
        &category.search_terms,
        &job.plan,
        &known,
        &job.throttle,
    )
    .await;
    outcome.errors.extend(candidates.errors);
    outcome.candidates = candidates.ids.len();

    if candidates.ids.is_empty() {
        info!("No new candidates");
        return outcome;
    }

    // ── 3. Fetch + extract ────────────────────────────────────────────────────
    let fetched = fetch_details(source, &candidates.ids, &job.extract).await;
    job.throttle.pause(source.is_authenticated()).await;

    let records = match fetched {
        Ok(records) => records,
        Err(e) => {
            outcome.fail(format!("fetch failed for {} ids: {e}", candidates.ids.len()));
            return outcome;
        }
    };
    outcome.fetched = records.len();

    // ── 4. Persist ────────────────────────────────────────────────────────────
    let mut written: HashSet<String> = HashSet::new();
    for record in &records {
        let unit = compose_unit(record, category.slug);
        let slug_taken = written.contains(&unit.slug)
            || store.slug_exists(category.slug, &unit.slug).await;

        match check_duplicate(&unit.slug, &record.identifier, &known, slug_taken) {
            DedupResult::New => {}
            dup => {
                debug!(pmid = %record.identifier, reason = ?dup, "Skipping duplicate");
                outcome.skipped += 1;
                continue;
            }
        }

        match store.write_new(&unit).await {
            Ok(WriteOutcome::Created(path)) => {
                info!(pmid = %record.identifier, path = %path.display(), "Unit created");
                known.insert(record.identifier.clone());
                written.insert(unit.slug);
                outcome.created += 1;
            }
            Ok(WriteOutcome::AlreadyExists) => {
                debug!(pmid = %record.identifier, slug = %unit.slug, "Slug appeared concurrently");
                outcome.skipped += 1;
            }
            Err(e) => outcome.fail(format!("write failed for {}: {e}", record.identifier)),
        }
    }

    info!(
        candidates = outcome.candidates,
        fetched    = outcome.fetched,
        created    = outcome.created,
        skipped    = outcome.skipped,
        "Category done"
    );
    outcome
}
