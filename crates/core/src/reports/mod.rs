//! Report job orchestration
//!
//! Drives a bulk report through create → poll → resolve → download → parse.

pub mod orchestrator;

pub use orchestrator::ReportOrchestrator;
