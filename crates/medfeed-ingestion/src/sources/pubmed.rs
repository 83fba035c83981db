//! PubMed E-utilities client.
//!
//! Endpoints used:
//!   esearch: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi
//!   efetch:  https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi

use async_trait::async_trait;
use medfeed_common::sandbox::SandboxClient as Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{LiteratureSource, SearchQuery, SearchResult};

pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

pub struct PubMedClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PubMedClient {
    /// Client against the public E-utilities endpoint.
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        Self::with_base_url(EUTILS_BASE_URL, api_key)
    }

    /// Client against a custom E-utilities base URL (mirrors, tests).
    pub fn with_base_url(base_url: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::for_base_url(base_url)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("db", "pubmed".to_string())];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }
}

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    #[serde(default)]
    esearchresult: ESearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    idlist: Vec<String>,
}

#[async_trait]
impl LiteratureSource for PubMedClient {
    #[instrument(skip(self), fields(term = %query.term))]
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResult> {
        let mut params = self.base_params();
        params.push(("term", query.rendered_term()));
        params.push(("retmax", query.max_results.to_string()));
        params.push(("retmode", "json".to_string()));
        params.push(("sort", "date".to_string()));

        let resp: ESearchResponse = self.client
            .get(&self.endpoint("esearch.fcgi"))?
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let result = SearchResult {
            count: resp.esearchresult.count
                .and_then(|c| c.parse().ok())
                .unwrap_or(0),
            ids: resp.esearchresult.idlist,
        };

        debug!(ids = ?result.ids, count = result.count, "PubMed esearch returned PMIDs");
        Ok(result)
    }

    #[instrument(skip(self), fields(n = ids.len()))]
    async fn fetch_raw(&self, ids: &[String]) -> anyhow::Result<String> {
        let mut params = self.base_params();
        params.push(("id", ids.join(",")));
        params.push(("retmode", "xml".to_string()));
        params.push(("rettype", "abstract".to_string()));

        let xml = self.client
            .get(&self.endpoint("efetch.fcgi"))?
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        debug!(bytes = xml.len(), "PubMed efetch returned XML");
        Ok(xml)
    }

    fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }
}
