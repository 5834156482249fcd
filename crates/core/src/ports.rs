//! Port interfaces consumed by the core
//!
//! The network adapter implements [`ReportsApi`]; the surrounding product
//! supplies [`CredentialProvider`] and [`ResultSink`].

use async_trait::async_trait;
use spgate_domain::{CreateReportSpec, Credentials, ReportDocument, ReportJob, Result};

/// Report lifecycle calls, each one authenticated request (or one plain
/// download for [`ReportsApi::download_document`]).
#[async_trait]
pub trait ReportsApi: Send + Sync {
    /// Create a report job and return the id the platform assigned.
    async fn create_report(&self, spec: &CreateReportSpec) -> Result<String>;

    /// Fetch the current state of a report job.
    async fn get_report(&self, report_id: &str) -> Result<ReportJob>;

    /// Fetch the download location of a finished report.
    async fn get_report_document(&self, document_id: &str) -> Result<ReportDocument>;

    /// Download a document body without platform credentials and return it
    /// as decompressed text.
    async fn download_document(&self, document: &ReportDocument) -> Result<String>;
}

/// Supplies decrypted credentials for an account.
///
/// Storage and decryption of secrets stay outside the client.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credentials(&self, account: &str) -> Result<Credentials>;
}

/// Receives results for downstream storage or display.
#[async_trait]
pub trait ResultSink<T: Send + Sync>: Send + Sync {
    /// Accept one batch, e.g. all rows of a report or one listing.
    async fn write_batch(&self, items: &[T]) -> Result<()>;

    /// Flush anything buffered.
    async fn finish(&self) -> Result<()> {
        Ok(())
    }
}

/// Provider that hands out one fixed set of credentials for every account.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: Credentials,
}

impl StaticCredentialProvider {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn credentials(&self, _account: &str) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }
}
