//! Command implementations.

use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use crate::cli::Commands;
use crate::output::{self, Source};
use kjvs_client::{HttpConfig, RemoteSearchLoader, ReqwestHttpClient};
use kjvs_core::{
    AppConfig, CacheStore, InMemoryCacheStore, JsonFileCacheStore, LoadError, LocalSearchCache, SearchLoader,
    SearchQuery, SearchResult, SqliteCacheStore, StoreBackend, StoreError,
};

/// Open the store selected by `config.store`.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn CacheStore>, StoreError> {
    let store: Arc<dyn CacheStore> = match config.store {
        StoreBackend::Sqlite => Arc::new(SqliteCacheStore::open(&config.db_path).await?),
        StoreBackend::Json => Arc::new(JsonFileCacheStore::new(config.json_path.clone())),
        StoreBackend::Memory => Arc::new(InMemoryCacheStore::new()),
    };
    tracing::debug!("opened {:?} cache store", config.store);
    Ok(store)
}

fn remote_loader(config: &AppConfig) -> Result<RemoteSearchLoader> {
    let url = Url::parse(config.require_search_url()?).context("invalid search URL")?;
    let client = ReqwestHttpClient::new(HttpConfig {
        bearer_token: config.api_token.clone(),
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
    })?;
    Ok(RemoteSearchLoader::new(url, Arc::new(client)))
}

/// Run `command` against the configured store and search endpoint.
pub async fn execute(command: Commands, config: &AppConfig, json: bool) -> Result<()> {
    let store = open_store(config).await?;
    let cache = LocalSearchCache::with_system_clock(store);

    match command {
        Commands::Search { query, limit, offline_fallback } => {
            let loader = remote_loader(config)?;
            let query = SearchQuery::new(query, limit.unwrap_or(config.default_limit));
            let (source, results) = search(&loader, &cache, &query, offline_fallback).await?;
            print_results(source, &results, json)?;
        }
        Commands::Cached => {
            let results = cache.load().await?;
            print_results(Source::Cache, &results, json)?;
        }
        Commands::Validate => {
            cache.validate_cache().await;
            eprintln!("Cache validated");
        }
        Commands::Clear => {
            cache.store().delete().await?;
            eprintln!("Cache cleared");
        }
    }

    Ok(())
}

/// Load from `remote` and cache what it returns.
///
/// A failed save is logged and does not fail the search. With
/// `offline_fallback`, a failed remote load is answered from the cache
/// instead; if the cache cannot be read either, the remote error is returned.
pub async fn search(
    remote: &dyn SearchLoader, cache: &LocalSearchCache, query: &SearchQuery, offline_fallback: bool,
) -> Result<(Source, Vec<SearchResult>), LoadError> {
    match remote.load(query).await {
        Ok(results) => {
            if let Err(e) = cache.save(&results).await {
                tracing::warn!("failed to cache search results: {}", e);
            }
            Ok((Source::Remote, results))
        }
        Err(e) if offline_fallback && !matches!(e, LoadError::InvalidQuery(_)) => {
            tracing::warn!("remote search failed, falling back to cache: {}", e);
            match cache.load().await {
                Ok(results) => Ok((Source::Cache, results)),
                Err(cache_err) => {
                    tracing::warn!("cache fallback failed: {}", cache_err);
                    Err(e)
                }
            }
        }
        Err(e) => Err(e),
    }
}

fn print_results(source: Source, results: &[SearchResult], json: bool) -> Result<()> {
    if json {
        println!("{}", output::render_json(source, results)?);
    } else {
        print!("{}", output::render_text(source, results));
    }
    Ok(())
}
