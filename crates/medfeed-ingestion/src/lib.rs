//! medfeed-ingestion: PubMed ingestion pipeline for the blog's content store.
//! - Query planning over each category's search terms
//! - E-utilities search and fetch with rate limiting
//! - Field extraction from PubmedArticle XML
//! - Slugging, composition and deduplication
//! - Category-directory persistence and the read contract

pub mod compose;
pub mod dedup;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod planner;
pub mod slug;
pub mod sources;
pub mod store;
pub mod throttle;

pub use pipeline::{run_ingestion, CategoryOutcome, IngestionJob, IngestionSummary};
pub use store::ContentStore;
