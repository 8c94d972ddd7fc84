//! Contract tests for EmployeeClient.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/authenticate_user/` | `authenticate_*` |
//! | GET    | `/get_employee/` | `get_employee_*` |
//! | POST   | `/reset_password/` | `reset_password_*` |

use mrp_upstream::{UpstreamClient, UpstreamConfig, UpstreamError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> UpstreamClient {
    let config = UpstreamConfig::local_mock(&mock_server.uri(), "test-token").unwrap();
    UpstreamClient::new(config).unwrap()
}

// ── POST /authenticate_user/ ─────────────────────────────────────────

#[tokio::test]
async fn authenticate_sends_login_and_shared_secret() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate_user/"))
        .and(header("Auth-Token", "test-token"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"user_login": "u", "password": "p"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "employee": {"id": 7, "name": "A", "email": "a@x"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let employee = test_client(&mock_server)
        .employees()
        .authenticate("u", "p")
        .await
        .unwrap();
    assert_eq!(employee.id, 7);
    assert_eq!(employee.name, "A");
    assert_eq!(employee.email.as_deref(), Some("a@x"));
}

#[tokio::test]
async fn authenticate_without_employee_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate_user/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "detail": "Wrong login or password"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .employees()
        .authenticate("u", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Rejected { .. }));
    assert_eq!(err.detail(), Some("Wrong login or password"));
}

#[tokio::test]
async fn authenticate_with_employee_false_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/authenticate_user/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"employee": false})))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .employees()
        .authenticate("u", "p")
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Rejected { detail: None, .. }));
}

// ── GET /get_employee/ ───────────────────────────────────────────────

#[tokio::test]
async fn get_employee_forwards_identity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_employee/"))
        .and(body_json(json!({"employee_id": "7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "employee": {"id": 7, "name": "Ana Torres", "email": false}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let employee = test_client(&mock_server).employees().get("7").await.unwrap();
    assert_eq!(employee.name, "Ana Torres");
    assert_eq!(employee.email, None);
}

#[tokio::test]
async fn get_employee_with_mistyped_payload_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get_employee/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "employee": {"name": "no id"}
        })))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).employees().get("7").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Malformed { .. }));
    assert!(err.is_transport());
}

// ── POST /reset_password/ ────────────────────────────────────────────

#[tokio::test]
async fn reset_password_sends_both_passwords() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reset_password/"))
        .and(body_json(json!({
            "employee_id": "7",
            "current_password": "old",
            "new_password": "new"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    test_client(&mock_server)
        .employees()
        .reset_password("7", "old", "new")
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_password_rejection_ignores_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reset_password/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"status": "denied"})))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .employees()
        .reset_password("7", "old", "new")
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Rejected { detail: None, .. }));
}
