//! Reports endpoint family and document download

use std::io::Read;

use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::Method;
use serde::Deserialize;
use spgate_core::ReportsApi;
use spgate_domain::{CreateReportSpec, ReportDocument, ReportJob, Result, SpApiError};
use tracing::{debug, instrument};

use super::client::{ApiRequest, SpApiClient};
use crate::errors::InfraError;

pub const REPORTS_PATH: &str = "/reports/2021-06-30";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateReportResponse {
    report_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportDocumentResponse {
    report_document_id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    compression_algorithm: Option<String>,
}

#[async_trait]
impl ReportsApi for SpApiClient {
    #[instrument(skip(self, spec), fields(report_type = %spec.report_type))]
    async fn create_report(&self, spec: &CreateReportSpec) -> Result<String> {
        let body = serde_json::to_value(spec)
            .map_err(|err| SpApiError::Config(format!("unserializable report request: {err}")))?;
        let request = ApiRequest::post(format!("{REPORTS_PATH}/reports"), body);

        let created: CreateReportResponse = self.execute(&request).await?;
        if created.report_id.trim().is_empty() {
            return Err(SpApiError::InvalidResponse("create report returned an empty reportId".into()));
        }

        debug!(report_id = %created.report_id, "Create report accepted");
        Ok(created.report_id)
    }

    async fn get_report(&self, report_id: &str) -> Result<ReportJob> {
        let request = ApiRequest::get(format!("{REPORTS_PATH}/reports/{report_id}"));
        self.execute(&request).await
    }

    async fn get_report_document(&self, document_id: &str) -> Result<ReportDocument> {
        let request = ApiRequest::get(format!("{REPORTS_PATH}/documents/{document_id}"));
        let document: ReportDocumentResponse = self.execute(&request).await?;

        let url = document.url.filter(|url| !url.trim().is_empty()).ok_or_else(|| {
            SpApiError::InvalidResponse(format!(
                "report document {} has no download url",
                document.report_document_id
            ))
        })?;

        Ok(ReportDocument {
            id: document.report_document_id,
            url,
            compression_algorithm: document.compression_algorithm,
        })
    }

    /// The URL is pre-signed, so no access token is attached.
    #[instrument(skip(self, document), fields(document_id = %document.id))]
    async fn download_document(&self, document: &ReportDocument) -> Result<String> {
        let http = self.http();
        let response = http.send(http.request(Method::GET, &document.url)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpApiError::api(status.as_u16(), body));
        }

        let bytes = response.bytes().await.map_err(|err| SpApiError::from(InfraError::from(err)))?;
        debug!(bytes = bytes.len(), compression = ?document.compression_algorithm, "Document downloaded");

        decode_document(&bytes, document.compression_algorithm.as_deref())
    }
}

/// Decompress (if needed) and decode a downloaded document body.
///
/// `GZIP` is the only compression the platform uses; the name is matched
/// case-insensitively.
///
/// # Errors
/// `SpApiError::Parse` for unknown algorithms, corrupt archives and bodies
/// that are not UTF-8.
pub fn decode_document(bytes: &[u8], compression: Option<&str>) -> Result<String> {
    let raw = match compression.map(str::trim) {
        None | Some("") => bytes.to_vec(),
        Some(algorithm) if algorithm.eq_ignore_ascii_case("GZIP") => {
            let mut decoded = Vec::new();
            GzDecoder::new(bytes)
                .read_to_end(&mut decoded)
                .map_err(|err| SpApiError::from(InfraError::from(err)))?;
            decoded
        }
        Some(other) => {
            return Err(SpApiError::Parse(format!("unsupported compression algorithm {other}")));
        }
    };

    String::from_utf8(raw)
        .map_err(|err| SpApiError::Parse(format!("document is not valid UTF-8: {err}")))
}
