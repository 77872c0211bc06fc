//! Command-line interface for `kjv-search`.
//!
//! ```bash
//! # Remote search, cached locally on success
//! kjv-search search "the Holy Ghost" --limit 5
//!
//! # Serve from the cache if the search API is unreachable
//! kjv-search search "faith" --offline-fallback
//!
//! # Cache maintenance
//! kjv-search cached
//! kjv-search validate
//! kjv-search clear
//! ```
//!
//! Configuration (search URL, store backend, paths) comes from `KJV_SEARCH_*`
//! environment variables; see `kjvs_core::AppConfig`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "kjv-search")]
#[command(about = "Search the KJV corpus with a local results cache", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Search remotely and cache the results
    Search {
        /// Search query
        query: String,

        /// Maximum number of results (defaults to KJV_SEARCH_DEFAULT_LIMIT)
        #[arg(short = 'n', long)]
        limit: Option<u16>,

        /// Load from the local cache when the remote search fails
        #[arg(long)]
        offline_fallback: bool,
    },

    /// Show the cached results, if still fresh
    Cached,

    /// Delete the cached results if stale or unreadable
    Validate,

    /// Delete the cached results
    Clear,
}
