//! Platform API client
//!
//! Every call goes through [`SpApiClient`], the authenticated request
//! pipeline: fetch a token, stamp the headers, send, and on a 401 invalidate
//! that token and try exactly once more. Endpoint families are thin typed
//! wrappers over the pipeline.
//!
//! # Module Organization
//!
//! - **[`client`]**: request pipeline, request/response values, rate limit
//!   header
//! - **[`reports`]**: report jobs and document download (`ReportsApi`)
//! - **[`inventory`]**: FBA inventory summaries
//! - **[`orders`]**: order listing
//! - **[`sellers`]**: marketplace participations and the connection check

pub mod client;
pub mod inventory;
pub mod orders;
pub mod reports;
pub mod sellers;

pub use client::{ApiRequest, ApiResponse, RateLimitInfo, SpApiClient};
pub use reports::{decode_document, REPORTS_PATH};
