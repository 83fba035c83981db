//! medfeed: PubMed ingestion for the blog's content store.
//! Entry point for the ingestion binary.

mod config;

use medfeed_ingestion::sources::pubmed::PubMedClient;
use medfeed_ingestion::sources::LiteratureSource;
use medfeed_ingestion::{run_ingestion, ContentStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("medfeed=debug,info")),
        )
        .init();

    info!("medfeed starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load()?;
    let job = config.to_job()?;
    info!(
        "Configuration loaded. {} categories, content root: {}",
        job.categories.len(),
        config.content.root.display()
    );

    let client = PubMedClient::with_base_url(&config.pubmed.base_url, config.pubmed.api_key.clone())?;
    if client.is_authenticated() {
        info!("Using NCBI API key (10 req/s)");
    } else {
        warn!("No PUBMED_API_KEY set; limited to 3 req/s");
    }

    let store = ContentStore::new(config.content.root.clone());
    let summary = run_ingestion(&job, &client, &store).await;

    for outcome in &summary.categories {
        info!(
            "{}: {} new, {} skipped ({} candidates)",
            outcome.category, outcome.created, outcome.skipped, outcome.candidates
        );
    }
    for err in &summary.errors {
        warn!("{err}");
    }
    info!(
        "Done. {} new articles, {} skipped in {} ms.",
        summary.total_created, summary.total_skipped, summary.duration_ms
    );

    if std::env::var("MEDFEED_SUMMARY_JSON").is_ok() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
