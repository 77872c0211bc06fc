//! Client code for kjv-search.
//!
//! This crate provides the HTTP transport and the network-backed
//! `SearchLoader` used alongside the local cache from `kjvs-core`.

pub mod http;
pub mod remote;

pub use http::{HttpClient, HttpConfig, HttpError, HttpResponse, ReqwestHttpClient};
pub use remote::RemoteSearchLoader;
