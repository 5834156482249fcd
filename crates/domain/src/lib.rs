//! # spgate Domain
//!
//! Data model for the selling-partner platform client.
//!
//! This crate contains:
//! - Credentials and the region × environment endpoint table
//! - Marketplace catalog
//! - Report job, report document, page and row types
//! - Endpoint-family payloads (inventory, orders, sellers)
//! - The typed error taxonomy and `Result` alias
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other spgate crates
//! - No I/O; pure data and validation

pub mod config;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
