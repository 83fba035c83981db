//! Query planner: turns a category's search terms into a batch of new
//! candidate PMIDs.

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::sources::{DateWindow, LiteratureSource, SearchQuery};
use crate::throttle::Throttle;

/// Search parameters shared by every term of a category.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// `retmax` of each search request.
    pub per_term_max: usize,
    /// Maximum number of candidates handed to the fetch stage.
    pub batch_cap: usize,
    pub date_window: Option<DateWindow>,
}

impl Default for QueryPlan {
    fn default() -> Self {
        Self {
            per_term_max: 3,
            batch_cap: 5,
            date_window: Some(DateWindow::RecentYears(3)),
        }
    }
}

/// Planner output for one category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    /// New identifiers, first-seen order, deduplicated and capped.
    pub ids: Vec<String>,
    /// One message per term whose search failed.
    pub errors: Vec<String>,
}

/// Search every term in order and collect identifiers absent from `known`.
///
/// Terms run one at a time with a throttle pause after each request. A failing
/// term is logged and skipped.
pub async fn plan_candidates(
    source: &dyn LiteratureSource,
    terms: &[String],
    plan: &QueryPlan,
    known: &HashSet<String>,
    throttle: &Throttle,
) -> Candidates {
    let mut candidates = Candidates::default();
    let mut seen = HashSet::new();
    let authenticated = source.is_authenticated();

    for term in terms {
        info!(term = %term, "Searching PubMed");
        let query = SearchQuery::new(term.as_str(), plan.per_term_max)
            .with_date_window(plan.date_window);

        let result = source.search(&query).await;
        throttle.pause(authenticated).await;

        match result {
            Ok(found) => {
                let before = candidates.ids.len();
                for id in found.ids {
                    if !known.contains(&id) && seen.insert(id.clone()) {
                        candidates.ids.push(id);
                    }
                }
                debug!(term = %term, new = candidates.ids.len() - before, total_hits = found.count, "Term searched");
            }
            Err(e) => {
                let msg = format!("search failed for term \"{term}\": {e}");
                warn!("{}", &msg);
                candidates.errors.push(msg);
            }
        }
    }

    candidates.ids.truncate(plan.batch_cap);
    candidates
}
