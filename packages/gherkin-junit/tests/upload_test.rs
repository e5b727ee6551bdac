//! Upload tests against a mock test-management endpoint.
//!
//! The upload transport is blocking, so each call runs on a blocking task
//! next to the async mock server.

use std::fs;
use std::path::PathBuf;

use gherkin_junit::config::UploadSettings;
use gherkin_junit::http::create_client;
use gherkin_junit::upload::{upload_report, UploadReceipt};
use gherkin_junit::ConverterError;
use tempfile::{tempdir, TempDir};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPORT: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"Login\"/>\n";

fn write_report() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let report = dir.path().join("junit_output.xml");
    fs::write(&report, REPORT).unwrap();
    (dir, report)
}

fn settings(server: &MockServer) -> UploadSettings {
    let mut job_detail = serde_json::Map::new();
    job_detail.insert("name".to_string(), serde_json::json!("Nightly run"));
    job_detail.insert("cycleId".to_string(), serde_json::json!(42));
    UploadSettings {
        url: format!("{}/upload", server.uri()),
        auth_token: "secret".to_string(),
        job_detail,
    }
}

async fn upload(
    report: PathBuf,
    settings: UploadSettings,
) -> Result<UploadReceipt, ConverterError> {
    tokio::task::spawn_blocking(move || {
        let client = create_client()?;
        upload_report(&client, &report, &settings)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_sends_report_and_job_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"jobId\":7}"))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, report) = write_report();
    let receipt = upload(report, settings(&server)).await.unwrap();
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body, "{\"jobId\":7}");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    let lowered = body.to_lowercase();
    assert!(body.contains("name=\"fileName\"; filename=\"junit_output.xml\""));
    assert!(lowered.contains("content-type: text/xml"));
    assert!(body.contains("<testsuite name=\"Login\"/>"));
    assert!(body.contains("name=\"automationJobDetail\""));
    assert!(lowered.contains("content-type: application/json"));
    assert!(body.contains("\"cycleId\":42"));
    assert!(body.contains("\"name\":\"Nightly run\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_rejected_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, report) = write_report();
    let err = upload(report, settings(&server)).await.unwrap_err();
    assert!(err.is_upload_error());
    match err {
        ConverterError::UploadRejected { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad token");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let (_dir, report) = write_report();
    let err = upload(report, settings(&server)).await.unwrap_err();
    assert!(matches!(
        err,
        ConverterError::RetriesExhausted { attempts: 3, .. }
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_recovers_after_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, report) = write_report();
    let receipt = upload(report, settings(&server)).await.unwrap();
    assert_eq!(receipt.status, 201);
}
