//! Upload of JUnit reports to a Zephyr-style test-management endpoint.
//!
//! One multipart POST carries two parts: the report file (`fileName`,
//! `text/xml`) and the job metadata (`automationJobDetail`, JSON).

use std::fs;
use std::path::Path;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::config::UploadSettings;
use crate::error::{ConverterError, Result};
use crate::http::send_with_retry;

/// Form field carrying the report file.
pub const FILE_FIELD: &str = "fileName";

/// Form field carrying the job metadata.
pub const JOB_DETAIL_FIELD: &str = "automationJobDetail";

const REPORT_CONTENT_TYPE: &str = "text/xml";
const JOB_DETAIL_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Successful upload response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub status: u16,
    pub body: String,
}

fn build_form(file_name: &str, report: &[u8], job_detail: &str) -> reqwest::Result<Form> {
    let file_part = Part::bytes(report.to_vec())
        .file_name(file_name.to_string())
        .mime_str(REPORT_CONTENT_TYPE)?;
    let job_part = Part::text(job_detail.to_string()).mime_str(JOB_DETAIL_CONTENT_TYPE)?;

    Ok(Form::new()
        .part(FILE_FIELD, file_part)
        .part(JOB_DETAIL_FIELD, job_part))
}

/// Upload a report file.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `report` - Path of the JUnit XML file
/// * `settings` - Resolved endpoint, token and job metadata
///
/// # Returns
/// * `Ok(UploadReceipt)` on a 2xx response
/// * `Err(ConverterError::UploadRejected)` on any other final status
pub fn upload_report(
    client: &Client,
    report: &Path,
    settings: &UploadSettings,
) -> Result<UploadReceipt> {
    let content = fs::read(report)?;
    let file_name = report
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.xml".to_string());
    let job_detail = serde_json::to_string(&settings.job_detail)?;

    tracing::info!(
        url = %settings.url,
        file = %file_name,
        bytes = content.len(),
        "Uploading report"
    );

    let response = send_with_retry(|| {
        let form = build_form(&file_name, &content, &job_detail)?;
        client
            .post(&settings.url)
            .bearer_auth(&settings.auth_token)
            .multipart(form)
            .send()
    })?;

    let status = response.status();
    let body = response.text().unwrap_or_default();

    if status.is_success() {
        tracing::info!(status = status.as_u16(), response = %body, "Upload successful");
        Ok(UploadReceipt {
            status: status.as_u16(),
            body,
        })
    } else {
        tracing::warn!(status = status.as_u16(), response = %body, "Upload rejected");
        Err(ConverterError::UploadRejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_form() {
        let form = build_form("junit.xml", b"<testsuite/>", "{}");
        assert!(form.is_ok());
    }

    #[test]
    fn test_missing_report_file() {
        let client = Client::new();
        let settings = UploadSettings {
            url: "http://127.0.0.1:9/upload".to_string(),
            auth_token: "token".to_string(),
            job_detail: serde_json::Map::new(),
        };
        let result = upload_report(&client, Path::new("/nonexistent/junit.xml"), &settings);
        assert!(matches!(result, Err(ConverterError::Io(_))));
    }
}
