//! # spgate Infrastructure
//!
//! Network and filesystem adapters for the platform client.
//!
//! This crate contains:
//! - The HTTP transport (timeouts, user agent)
//! - The Login-with-Amazon token exchanger and the token provider seam
//! - The authenticated request pipeline with its single 401 retry
//! - Endpoint families: reports, FBA inventory, orders, sellers
//! - Report document download and decompression
//! - The configuration loader
//!
//! ## Architecture
//! - Implements the ports defined in `spgate-core`
//! - Depends on `spgate-common`, `spgate-domain` and `spgate-core`
//! - Contains all "impure" code (network and file I/O)

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;

mod client;

// Re-export commonly used items
pub use api::{ApiRequest, ApiResponse, RateLimitInfo, SpApiClient};
pub use auth::{AccessTokenProvider, CachedTokenProvider, LwaTokenExchanger};
pub use client::SpApi;
pub use errors::InfraError;
pub use http::HttpClient;
