use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::error::AppError;
use crate::models::filters::AnalysisFilters;
use crate::services::api::ApiClient;

/// Receipt for a generated report. The backend renders the PDF and hands
/// back a short-lived download URL.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExportReceipt {
    pub download_url: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Requests a PDF report for the current filter set. Premium-gated in the
/// UI through `Feature::PdfExport`; the backend enforces the entitlement
/// regardless.
pub async fn request_pdf_export(
    client: &ApiClient,
    filters: &AnalysisFilters,
) -> Result<ExportReceipt, AppError> {
    client
        .post("/api/v1/export/pdf", &filters.normalized().to_request_body())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_parsing() {
        let json = r#"{"download_url": "https://cdn.example.com/r/abc.pdf"}"#;
        let receipt: ExportReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.download_url, "https://cdn.example.com/r/abc.pdf");
        assert_eq!(receipt.expires_at, None);
    }
}
