use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;
use url::Url;
use crate::error::MedfeedError;

/// Hosts the ingestion pipeline talks to out of the box.
const DEFAULT_ALLOWLIST: &[&str] = &[
    "eutils.ncbi.nlm.nih.gov", // PubMed E-utilities
];

const USER_AGENT: &str = concat!("medfeed/", env!("CARGO_PKG_VERSION"), " (literature ingestion)");

/// HTTP client restricted to an allowlist of hosts. Every outbound call of
/// the pipeline goes through it.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with the default allowlist.
    pub fn new() -> Result<Self, MedfeedError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MedfeedError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let allowlist = DEFAULT_ALLOWLIST.iter().map(|d| d.to_string()).collect();
        Ok(Self { client, allowlist })
    }

    /// Creates a client that additionally allows the host of `base_url`.
    pub fn for_base_url(base_url: &str) -> Result<Self, MedfeedError> {
        let host = Url::parse(base_url)
            .ok()
            .and_then(|u| u.host_str().map(String::from))
            .ok_or_else(|| MedfeedError::Config(format!("Invalid base URL: {}", base_url)))?;

        let mut sandbox = Self::new()?;
        sandbox.allow_domain(&host);
        Ok(sandbox)
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Whether `url` targets an allowlisted host or one of its subdomains.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) else {
            return false;
        };
        self.allowlist.iter().any(|allowed| {
            host == *allowed
                || host.strip_suffix(allowed.as_str()).is_some_and(|rest| rest.ends_with('.'))
        })
    }

    /// GET request builder for an allowlisted URL.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, MedfeedError> {
        if !self.is_allowed(url) {
            warn!(url, "Blocked request to host outside the allowlist");
            return Err(MedfeedError::Security(format!("host not in allowlist: {url}")));
        }
        Ok(self.client.get(url))
    }
}
