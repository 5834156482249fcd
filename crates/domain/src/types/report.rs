//! Report job lifecycle types
//!
//! A report job moves `IN_QUEUE → IN_PROGRESS → DONE | FAILED | CANCELLED`
//! (a queued job may also jump straight to a terminal state). Status is only
//! ever learned by re-fetching it from the platform.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::marketplace::MarketplaceId;

/// Processing status reported for a report job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    InQueue,
    InProgress,
    Done,
    /// `FATAL` is the platform's spelling; `FAILED` is accepted too.
    #[serde(alias = "FATAL")]
    Failed,
    Cancelled,
}

impl ProcessingStatus {
    /// `DONE`, `FAILED` and `CANCELLED` never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Cancelled)
    }

    /// Terminal and not `DONE`.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Cancelled)
    }

    /// Whether `next` is a legal successor of `self`.
    ///
    /// Observing the same status again is always legal.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        match self {
            Self::InQueue => true,
            Self::InProgress => next.is_terminal(),
            Self::Done | Self::Failed | Self::Cancelled => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InQueue => "IN_QUEUE",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a report job as last fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportJob {
    #[serde(rename = "reportId")]
    pub id: String,
    #[serde(rename = "processingStatus")]
    pub status: ProcessingStatus,
    #[serde(rename = "reportDocumentId", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(rename = "reportType", default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(rename = "processingStartTime", default, skip_serializing_if = "Option::is_none")]
    pub processing_start_time: Option<DateTime<Utc>>,
    #[serde(rename = "processingEndTime", default, skip_serializing_if = "Option::is_none")]
    pub processing_end_time: Option<DateTime<Utc>>,
}

impl ReportJob {
    /// A freshly created job, before its first status poll.
    pub fn queued(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: ProcessingStatus::InQueue,
            document_id: None,
            report_type: None,
            processing_start_time: None,
            processing_end_time: None,
        }
    }
}

/// Download location of a finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub id: String,
    /// Pre-signed, time-limited URL on a different origin than the API
    pub url: String,
    pub compression_algorithm: Option<String>,
}

/// Body of a create-report call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportSpec {
    pub report_type: String,
    pub marketplace_ids: Vec<MarketplaceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub report_options: BTreeMap<String, String>,
}

impl CreateReportSpec {
    pub fn new(report_type: impl Into<String>, marketplace_ids: Vec<MarketplaceId>) -> Self {
        Self {
            report_type: report_type.into(),
            marketplace_ids,
            data_start_time: None,
            data_end_time: None,
            report_options: BTreeMap::new(),
        }
    }

    /// Restrict the report to a time window.
    #[must_use]
    pub fn with_data_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.data_start_time = start;
        self.data_end_time = end;
        self
    }

    /// Add a report-type specific option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.report_options.insert(key.into(), value.into());
        self
    }
}
