//! Search result data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Default number of results requested per search.
pub const DEFAULT_LIMIT: u16 = 10;

/// Largest result count a single search may request.
pub const MAX_LIMIT: u16 = 100;

/// Longest accepted query, in characters.
const MAX_QUERY_CHARS: usize = 400;

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Unique identifier of the matched sample.
    pub sample_id: String,
    /// Relevance score; smaller is closer.
    pub distance: f64,
    /// Locator of the source document (e.g. `2 timothy/1/14`).
    pub external_id: String,
    /// Matched text.
    pub data: String,
}

impl SearchResult {
    pub fn new(
        sample_id: impl Into<String>, distance: f64, external_id: impl Into<String>, data: impl Into<String>,
    ) -> Self {
        Self { sample_id: sample_id.into(), distance, external_id: external_id.into(), data: data.into() }
    }
}

/// The single batch a store holds, stamped with the time it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedBatch {
    pub results: Vec<SearchResult>,
    pub timestamp: DateTime<Utc>,
}

/// A free-text search with a result-count limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "query")]
    pub text: String,
    pub limit: u16,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: u16) -> Self {
        Self { text: text.into(), limit }
    }

    /// Reject queries no backend should receive.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.text.trim().is_empty() {
            return Err(LoadError::InvalidQuery("query cannot be empty".to_string()));
        }

        let chars = self.text.chars().count();
        if chars > MAX_QUERY_CHARS {
            return Err(LoadError::InvalidQuery(format!(
                "query too long: {} chars (max {})",
                chars, MAX_QUERY_CHARS
            )));
        }

        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(LoadError::InvalidQuery(format!("limit must be 1-{}", MAX_LIMIT)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = SearchResult::new("sample_1", 0.25, "john/3/16", "For God so loved the world");
        let b = SearchResult::new("sample_1", 0.25, "john/3/16", "For God so loved the world");
        let c = SearchResult { distance: 0.5, ..a.clone() };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_wire_field_names() {
        let result = SearchResult::new("sample_1", 0.01, "externalId", "data");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sampleId"], "sample_1");
        assert_eq!(json["externalId"], "externalId");
        assert!(json.get("sample_id").is_none());
    }

    #[test]
    fn test_valid_query() {
        assert!(SearchQuery::new("What is the Holy Ghost", DEFAULT_LIMIT).validate().is_ok());
        assert!(SearchQuery::new("grace", MAX_LIMIT).validate().is_ok());
    }

    #[test]
    fn test_blank_query() {
        let result = SearchQuery::new("   ", DEFAULT_LIMIT).validate();
        assert!(matches!(result, Err(LoadError::InvalidQuery(_))));
    }

    #[test]
    fn test_query_too_long() {
        let result = SearchQuery::new("a".repeat(401), DEFAULT_LIMIT).validate();
        assert!(matches!(result, Err(LoadError::InvalidQuery(_))));
    }

    #[test]
    fn test_limit_out_of_range() {
        assert!(SearchQuery::new("faith", 0).validate().is_err());
        assert!(SearchQuery::new("faith", MAX_LIMIT + 1).validate().is_err());
    }
}
