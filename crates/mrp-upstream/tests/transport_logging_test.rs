//! Error logging contract of the shared transport.
//!
//! Transport and shape failures are logged exactly once at `ERROR`;
//! rejections reported in the body are returned silently.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/get_products/` | `timeout_*`, `refused_*`, `rejection_*` |
//! | GET    | `/get_workorder/` | `missing_payload_*` |

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mrp_upstream::{OrderQuery, UpstreamClient, UpstreamConfig, UpstreamError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// In-memory log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Install a subscriber writing to this sink for the current thread.
    fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn error_lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.trim_start().starts_with("ERROR"))
            .map(str::to_string)
            .collect()
    }
}

fn client_for(base_url: &str, timeout_secs: u64) -> UpstreamClient {
    let mut config = UpstreamConfig::local_mock(base_url, "test-token").unwrap();
    config.timeout_secs = timeout_secs;
    UpstreamClient::new(config).unwrap()
}

#[tokio::test]
async fn timeout_logs_one_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_products/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "product_ids": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server.uri(), 1);

    let logs = LogCapture::default();
    let _guard = logs.install();
    let err = client.catalog().products().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Unreachable { .. }));
    let errors = logs.error_lines();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("get_products"));
}

#[tokio::test]
async fn refused_connection_logs_one_error() {
    let client = client_for("http://127.0.0.1:1", 5);

    let logs = LogCapture::default();
    let _guard = logs.install();
    let err = client.catalog().products().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Unreachable { .. }));
    assert_eq!(logs.error_lines().len(), 1);
}

#[tokio::test]
async fn rejection_is_not_logged() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "detail": "Access denied"
        })))
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server.uri(), 5);

    let logs = LogCapture::default();
    let _guard = logs.install();
    let err = client.catalog().products().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Rejected { .. }));
    assert!(logs.error_lines().is_empty());
}

#[tokio::test]
async fn missing_payload_logs_one_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_workorder/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "workorder_ids": []
        })))
        .mount(&mock_server)
        .await;
    let client = client_for(&mock_server.uri(), 5);

    let logs = LogCapture::default();
    let _guard = logs.install();
    let err = client
        .workorders()
        .list("7", &OrderQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Malformed { .. }));
    assert_eq!(logs.error_lines().len(), 1);
}
