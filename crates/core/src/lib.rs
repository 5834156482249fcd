//! # spgate Core
//!
//! Protocol logic of the platform client - no transport of its own.
//!
//! This crate contains:
//! - The cursor paginator (eager collector and lazy page stream)
//! - The report job orchestrator: create, poll, resolve, download, parse
//! - The delimited text parser for report documents
//! - Port interfaces for the network adapter and external collaborators
//!
//! ## Architecture Principles
//! - Depends only on `spgate-domain`
//! - All I/O goes through the traits in [`ports`]
//! - Pure, testable logic with deterministic (paused) time in tests

pub mod pagination;
pub mod parser;
pub mod ports;
pub mod reports;

// Re-export specific items to avoid ambiguity
pub use pagination::{collect_all, collect_stream, item_stream, page_stream};
pub use parser::DelimitedTextParser;
pub use ports::{CredentialProvider, ReportsApi, ResultSink, StaticCredentialProvider};
pub use reports::ReportOrchestrator;
