//! Pipeline runs against an in-memory literature source and a temp store.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use medfeed_common::{Category, CategorySlug};
use medfeed_ingestion::sources::{LiteratureSource, SearchQuery, SearchResult};
use medfeed_ingestion::{run_ingestion, ContentStore, IngestionJob};
use tempfile::TempDir;

const LONG_ABSTRACT: &str = "Convolutional neural networks were trained on a multicentre dataset \
    of annotated images and evaluated against specialist readers in a prospective setting.";

struct FakeSource {
    terms: HashMap<String, Vec<String>>,
    articles: HashMap<String, String>,
    failing_fetch: bool,
    fetched: Mutex<Vec<Vec<String>>>,
}

impl FakeSource {
    fn new() -> Self {
        Self {
            terms: HashMap::new(),
            articles: HashMap::new(),
            failing_fetch: false,
            fetched: Mutex::new(Vec::new()),
        }
    }

    fn term(mut self, term: &str, ids: &[&str]) -> Self {
        self.terms.insert(term.to_string(), ids.iter().map(|s| s.to_string()).collect());
        self
    }

    fn article(mut self, pmid: &str, title: &str, abstract_text: &str) -> Self {
        let xml = format!(
            "<PubmedArticle><MedlineCitation><PMID Version=\"1\">{pmid}</PMID><Article>\
             <Journal><JournalIssue><PubDate><Year>2025</Year><Month>Apr</Month><Day>2</Day></PubDate></JournalIssue>\
             <Title>Journal of Dentistry</Title></Journal>\
             <ArticleTitle>{title}</ArticleTitle>\
             <Abstract><AbstractText>{abstract_text}</AbstractText></Abstract>\
             <AuthorList><Author><LastName>Rossi</LastName><ForeName>Luca</ForeName></Author></AuthorList>\
             </Article><KeywordList><Keyword>deep learning</Keyword></KeywordList></MedlineCitation>\
             <PubmedData><ArticleIdList><ArticleId IdType=\"doi\">10.1000/{pmid}</ArticleId></ArticleIdList></PubmedData>\
             </PubmedArticle>"
        );
        self.articles.insert(pmid.to_string(), xml);
        self
    }
}

#[async_trait]
impl LiteratureSource for FakeSource {
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResult> {
        match self.terms.get(&query.term) {
            Some(ids) => Ok(SearchResult {
                count: ids.len(),
                ids: ids.iter().take(query.max_results).cloned().collect(),
            }),
            None => anyhow::bail!("HTTP 503 Service Unavailable"),
        }
    }

    async fn fetch_raw(&self, ids: &[String]) -> anyhow::Result<String> {
        self.fetched.lock().unwrap().push(ids.to_vec());
        if self.failing_fetch {
            anyhow::bail!("connection reset");
        }
        let body: String = ids.iter().filter_map(|id| self.articles.get(id)).cloned().collect();
        Ok(format!("<?xml version=\"1.0\"?><PubmedArticleSet>{body}</PubmedArticleSet>"))
    }
}

fn category(slug: CategorySlug, terms: &[&str]) -> Category {
    Category {
        slug,
        name: slug.to_string(),
        description: String::new(),
        color: "#000000".to_string(),
        search_terms: terms.iter().map(|t| t.to_string()).collect(),
    }
}

fn job(categories: Vec<Category>) -> IngestionJob {
    IngestionJob { categories, ..IngestionJob::default() }
}

async fn stored_ids(store: &ContentStore, slug: CategorySlug) -> Vec<String> {
    store
        .list_by_category(slug)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|m| m.frontmatter.pubmed_id)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_run_creates_units_and_second_run_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path());
    let source = FakeSource::new()
        .term("caries AI", &["101", "102"])
        .term("radiology AI", &["201"])
        .article("101", "Caries detection with CNNs", LONG_ABSTRACT)
        .article("102", "Periapical lesions on CBCT", LONG_ABSTRACT)
        .article("201", "Chest radiograph triage", LONG_ABSTRACT);
    let job = job(vec![
        category(CategorySlug::IaOdontologia, &["caries AI"]),
        category(CategorySlug::IaRadiologia, &["radiology AI"]),
    ]);

    let first = run_ingestion(&job, &source, &store).await;
    assert_eq!(first.total_created, 3);
    assert_eq!(first.total_skipped, 0);
    assert!(first.errors.is_empty());
    assert_eq!(first.outcome(CategorySlug::IaOdontologia).unwrap().created, 2);

    let post = store.get_by_slug("ia-odontologia/caries-detection-with-cnns").await.unwrap().unwrap();
    assert_eq!(post.meta.frontmatter.date, "2025-04-02");
    assert_eq!(post.meta.frontmatter.doi.as_deref(), Some("10.1000/101"));
    assert_eq!(post.meta.frontmatter.tags, vec!["deep learning"]);

    let second = run_ingestion(&job, &source, &store).await;
    assert_eq!(second.total_created, 0);
    assert_eq!(second.outcome(CategorySlug::IaOdontologia).unwrap().existing, 2);
    assert_eq!(second.outcome(CategorySlug::IaOdontologia).unwrap().candidates, 0);
    // Nothing new to fetch on the second run.
    assert_eq!(source.fetched.lock().unwrap().len(), 2);
    assert_eq!(store.list_all().await.unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_identifiers_unique_within_category() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path());
    let source = FakeSource::new()
        .term("a", &["1", "2"])
        .term("b", &["2", "3"])
        .article("1", "First", LONG_ABSTRACT)
        .article("2", "Second", LONG_ABSTRACT)
        .article("3", "Third", LONG_ABSTRACT);
    let job = job(vec![category(CategorySlug::IaMedicina, &["a", "b"])]);

    run_ingestion(&job, &source, &store).await;
    run_ingestion(&job, &source, &store).await;

    let ids = stored_ids(&store, CategorySlug::IaMedicina).await;
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test(start_paused = true)]
async fn test_slug_collision_is_skipped() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path());
    let source = FakeSource::new()
        .term("t", &["1", "2"])
        .article("1", "Same title", LONG_ABSTRACT)
        .article("2", "Same Title!", LONG_ABSTRACT);
    let job = job(vec![category(CategorySlug::Investigacion, &["t"])]);

    let summary = run_ingestion(&job, &source, &store).await;
    assert_eq!(summary.total_created, 1);
    assert_eq!(summary.total_skipped, 1);
    assert_eq!(stored_ids(&store, CategorySlug::Investigacion).await, vec!["1"]);
}

#[tokio::test(start_paused = true)]
async fn test_short_abstracts_are_dropped() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path());
    let source = FakeSource::new()
        .term("t", &["1", "2"])
        .article("1", "Long one", LONG_ABSTRACT)
        .article("2", "Short one", "Too short.");
    let job = job(vec![category(CategorySlug::IaMedicina, &["t"])]);

    let summary = run_ingestion(&job, &source, &store).await;
    let outcome = summary.outcome(CategorySlug::IaMedicina).unwrap();
    assert_eq!(outcome.candidates, 2);
    assert_eq!(outcome.fetched, 1);
    assert_eq!(outcome.created, 1);
}

#[tokio::test(start_paused = true)]
async fn test_failures_are_isolated() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path());
    let mut source = FakeSource::new()
        .term("ok", &["1"])
        .article("1", "Fine", LONG_ABSTRACT);
    source.failing_fetch = true;
    let job = job(vec![
        category(CategorySlug::IaMedicina, &["missing term", "ok"]),
        category(CategorySlug::IaRadiologia, &["ok"]),
    ]);

    let summary = run_ingestion(&job, &source, &store).await;
    assert_eq!(summary.total_created, 0);
    assert_eq!(summary.categories.len(), 2);

    let medicina = summary.outcome(CategorySlug::IaMedicina).unwrap();
    assert_eq!(medicina.errors.len(), 2);
    assert!(medicina.errors[0].contains("missing term"));
    assert!(medicina.errors[1].contains("fetch failed"));

    // The second category was still attempted.
    assert_eq!(source.fetched.lock().unwrap().len(), 2);
    assert_eq!(summary.errors.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_batch_cap_limits_fetch() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path());
    let mut source = FakeSource::new()
        .term("a", &["1", "2", "3"])
        .term("b", &["4", "5", "6"]);
    for id in ["1", "2", "3", "4", "5", "6"] {
        source = source.article(id, &format!("Paper {id}"), LONG_ABSTRACT);
    }
    let job = job(vec![category(CategorySlug::IaMedicina, &["a", "b"])]);

    let summary = run_ingestion(&job, &source, &store).await;
    assert_eq!(summary.total_created, 5);
    assert_eq!(source.fetched.lock().unwrap()[0], vec!["1", "2", "3", "4", "5"]);
}
