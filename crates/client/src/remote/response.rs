//! Search API response types and mapping.

use serde::Deserialize;

use crate::http::HttpResponse;
use kjvs_core::{LoadError, SearchResult};

/// Only this status carries results; everything else, including other 2xx codes, is invalid.
const OK_STATUS: u16 = 200;

/// Raw response body from the search endpoint.
#[derive(Debug, Deserialize)]
struct RemoteSearchResponse {
    #[serde(rename = "searchSamples")]
    search_samples: Vec<RemoteSearchItem>,
}

/// Individual search hit as sent by the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteSearchItem {
    sample_id: String,
    distance: f64,
    external_id: String,
    data: String,
}

impl From<RemoteSearchItem> for SearchResult {
    fn from(item: RemoteSearchItem) -> Self {
        SearchResult { sample_id: item.sample_id, distance: item.distance, external_id: item.external_id, data: item.data }
    }
}

/// Turn an HTTP exchange into results, preserving server order.
pub(crate) fn map(response: &HttpResponse) -> Result<Vec<SearchResult>, LoadError> {
    if response.status != OK_STATUS {
        return Err(LoadError::InvalidData(format!("unexpected status {}", response.status)));
    }

    let decoded: RemoteSearchResponse =
        serde_json::from_slice(&response.body).map_err(|e| LoadError::InvalidData(e.to_string()))?;

    Ok(decoded.search_samples.into_iter().map(SearchResult::from).collect())
}
