//! Network-backed [`SearchLoader`].
//!
//! ### Request
//! - One `POST` per load, JSON body `{"query": "...", "limit": N}`.
//! - The query is validated first; an invalid query never reaches the network.
//!
//! ### Response mapping
//! - Transport failure: `LoadError::Connectivity`
//! - Status other than 200, or a body that is not `{"searchSamples": [...]}`: `LoadError::InvalidData`
//! - Otherwise the samples, in server order

pub mod response;

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::http::HttpClient;
use kjvs_core::{LoadError, SearchLoader, SearchQuery, SearchResult};

/// Loads search results from the remote search endpoint.
#[derive(Clone)]
pub struct RemoteSearchLoader {
    url: Url,
    client: Arc<dyn HttpClient>,
}

impl RemoteSearchLoader {
    pub fn new(url: Url, client: Arc<dyn HttpClient>) -> Self {
        Self { url, client }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SearchLoader for RemoteSearchLoader {
    async fn load(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LoadError> {
        query.validate()?;

        let body = serde_json::to_value(query).map_err(|e| LoadError::InvalidQuery(e.to_string()))?;

        tracing::debug!("searching: query={} limit={}", query.text, query.limit);

        let response = self
            .client
            .post_json(&self.url, &body)
            .await
            .map_err(|e| LoadError::Connectivity(e.to_string()))?;

        let results = response::map(&response)?;
        tracing::debug!("search returned {} results", results.len());
        Ok(results)
    }
}
