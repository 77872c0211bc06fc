//! The loader contract shared by the remote and local search sources.

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::{SearchQuery, SearchResult};

/// Anything that can answer a search with an ordered list of results.
///
/// Consumers depend on this trait only, so they cannot tell whether the
/// results came from the network or from the local cache.
#[async_trait]
pub trait SearchLoader: Send + Sync {
    /// Produce the results for `query`, in the order the source returned them.
    async fn load(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, LoadError>;
}
