//! Report job state machine
//!
//! The orchestrator never guesses a status. Every transition it acts on is
//! one it read back from the platform, and polling is bounded by a
//! [`PollingPolicy`] so a job that never settles ends in
//! `SpApiError::ReportTimeout` rather than an endless loop.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use spgate_domain::{
    CreateReportSpec, MarketplaceId, PollingPolicy, ProcessingStatus, ReportDocument, ReportJob,
    Result, Row, SpApiError,
};
use tracing::{debug, info, instrument, warn};

use crate::parser::DelimitedTextParser;
use crate::ports::ReportsApi;

/// Runs report jobs against a [`ReportsApi`].
#[derive(Clone)]
pub struct ReportOrchestrator {
    api: Arc<dyn ReportsApi>,
    parser: DelimitedTextParser,
    policy: PollingPolicy,
}

impl ReportOrchestrator {
    /// Create an orchestrator with the default comma parser.
    pub fn new(api: Arc<dyn ReportsApi>, policy: PollingPolicy) -> Self {
        Self { api, parser: DelimitedTextParser::default(), policy }
    }

    /// Use a different parser, e.g. [`DelimitedTextParser::tab`].
    #[must_use]
    pub fn with_parser(mut self, parser: DelimitedTextParser) -> Self {
        self.parser = parser;
        self
    }

    /// Polling budget used by [`Self::run_full_cycle`].
    pub fn policy(&self) -> PollingPolicy {
        self.policy
    }

    /// Create a report job and return its id.
    ///
    /// # Errors
    /// Propagates the create call's failure.
    pub async fn create_job(
        &self,
        report_type: &str,
        marketplace_ids: &[MarketplaceId],
        data_start_time: Option<DateTime<Utc>>,
        data_end_time: Option<DateTime<Utc>>,
    ) -> Result<String> {
        let spec = CreateReportSpec::new(report_type, marketplace_ids.to_vec())
            .with_data_range(data_start_time, data_end_time);
        self.create_job_from_spec(&spec).await
    }

    /// Create a report job from a [`CreateReportSpec`], report options included.
    ///
    /// # Errors
    /// Propagates the create call's failure.
    #[instrument(skip(self, spec), fields(report_type = %spec.report_type))]
    pub async fn create_job_from_spec(&self, spec: &CreateReportSpec) -> Result<String> {
        let report_id = self.api.create_report(spec).await?;
        info!(report_id = %report_id, "Report job created");
        Ok(report_id)
    }

    /// Poll a job until it is `DONE`.
    ///
    /// Polls at most `policy.max_attempts` times and sleeps `policy.delay`
    /// between polls, never after the last one.
    ///
    /// # Errors
    /// - `SpApiError::ReportFailed` as soon as a poll reads `FAILED` or
    ///   `CANCELLED`
    /// - `SpApiError::ReportTimeout` once the budget is spent
    /// - any error of the status call itself
    #[instrument(skip(self, policy), fields(max_attempts = policy.max_attempts))]
    pub async fn await_completion(
        &self,
        report_id: &str,
        policy: &PollingPolicy,
    ) -> Result<ReportJob> {
        let mut previous: Option<ProcessingStatus> = None;

        for attempt in 1..=policy.max_attempts {
            let job = self.api.get_report(report_id).await?;
            debug!(attempt, status = %job.status, "Polled report status");

            if let Some(previous) = previous {
                if !previous.can_transition_to(job.status) {
                    warn!(
                        from = %previous,
                        to = %job.status,
                        "Report status moved backwards; trusting the platform"
                    );
                }
            }

            match job.status {
                ProcessingStatus::Done => {
                    info!(attempt, document_id = ?job.document_id, "Report finished");
                    return Ok(job);
                }
                status if status.is_failure() => {
                    warn!(attempt, %status, "Report ended without a document");
                    return Err(SpApiError::ReportFailed {
                        report_id: report_id.to_string(),
                        status,
                    });
                }
                _ => {}
            }

            previous = Some(job.status);
            if attempt < policy.max_attempts {
                tokio::time::sleep(policy.delay()).await;
            }
        }

        warn!(attempts = policy.max_attempts, "Report polling budget exhausted");
        Err(SpApiError::ReportTimeout {
            report_id: report_id.to_string(),
            attempts: policy.max_attempts,
        })
    }

    /// Fetch the download location of a finished report.
    ///
    /// # Errors
    /// Propagates the document call's failure.
    pub async fn resolve_document(&self, document_id: &str) -> Result<ReportDocument> {
        self.api.get_report_document(document_id).await
    }

    /// Resolve a document, download it without platform credentials and
    /// parse it into rows.
    ///
    /// # Errors
    /// Propagates resolve and download failures; an empty body is not an
    /// error and yields no rows.
    #[instrument(skip(self))]
    pub async fn download_and_parse(&self, document_id: &str) -> Result<Vec<Row>> {
        let document = self.resolve_document(document_id).await?;
        let body = self.api.download_document(&document).await?;
        let rows = self.parser.parse(&body);
        info!(rows = rows.len(), "Report document parsed");
        Ok(rows)
    }

    /// Create, await, resolve and download a report in one call, using the
    /// orchestrator's polling policy.
    ///
    /// # Errors
    /// Any error from the individual steps. A `DONE` job without a document
    /// id is reported as `SpApiError::InvalidResponse`.
    pub async fn run_full_cycle(
        &self,
        report_type: &str,
        marketplace_ids: &[MarketplaceId],
    ) -> Result<Vec<Row>> {
        let spec = CreateReportSpec::new(report_type, marketplace_ids.to_vec());
        self.run_cycle(&spec).await
    }

    /// [`Self::run_full_cycle`] for a [`CreateReportSpec`].
    ///
    /// # Errors
    /// See [`Self::run_full_cycle`].
    pub async fn run_cycle(&self, spec: &CreateReportSpec) -> Result<Vec<Row>> {
        let report_id = self.create_job_from_spec(spec).await?;
        let job = self.await_completion(&report_id, &self.policy).await?;
        let document_id = job.document_id.ok_or_else(|| {
            SpApiError::InvalidResponse(format!("report {report_id} is DONE without a document id"))
        })?;
        self.download_and_parse(&document_id).await
    }
}
