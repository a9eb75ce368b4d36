//! # HTTP Client Integration Tests
//!
//! Drives `ApiClient` against an in-process axum backend: token injection,
//! envelope unwrapping, error normalization and session clearing on 401.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use ipl_client::feedback::{classify, route, Presentation};
use ipl_client::services::api::FeeQuery;
use ipl_client::{ApiClient, ApiService, AppError, Session};
use parking_lot::Mutex;
use serde_json::{json, Value};
use shared::{FeeStatus, GenerateFeesRequest, LoginRequest};

use common::{client, fee, logged_in, resident, spawn_backend};

/// Headers and query strings seen by the mock backend.
#[derive(Clone, Default)]
struct Recorder {
    authorization: Arc<Mutex<Vec<Option<String>>>>,
    request_ids: Arc<Mutex<Vec<String>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl Recorder {
    fn record(&self, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.authorization.lock().push(header("authorization"));
        if let Some(id) = header("x-request-id") {
            self.request_ids.lock().push(id);
        }
    }
}

fn router(recorder: Recorder) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/fees", get(list_fees))
        .route("/api/fees/{id}", get(slow_fee))
        .route("/api/admin/fees/generate", post(generate_conflict))
        .route("/api/admin/users", get(users_invalid))
        .route("/api/payments", get(payments_broken))
        .route("/api/notifications", get(notifications_unauthorized))
        .route("/api/notifications/read-all", patch(read_all))
        .route("/api/notifications/{id}", delete(delete_notification))
        .with_state(recorder)
}

async fn login(State(recorder): State<Recorder>, headers: HeaderMap, Json(body): Json<LoginRequest>) -> impl IntoResponse {
    recorder.record(&headers);
    if body.password == "rahasia123" {
        (
            StatusCode::OK,
            Json(json!({ "data": { "token": "tok-fresh", "user": resident() }, "message": "Login berhasil" })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Email atau kata sandi salah" })),
        )
    }
}

async fn me(State(recorder): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    recorder.record(&headers);
    Json(json!({ "data": resident() }))
}

async fn list_fees(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorder.record(&headers);
    recorder.queries.lock().push(query);
    Json(json!({ "data": [fee("fee-3", 3, FeeStatus::Unpaid)] }))
}

async fn slow_fee(Path(id): Path<String>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Json(json!({ "data": fee(&id, 3, FeeStatus::Unpaid) }))
}

async fn generate_conflict() -> impl IntoResponse {
    (
        StatusCode::CONFLICT,
        Json(json!({ "message": "Iuran periode ini sudah dibuat" })),
    )
}

async fn users_invalid() -> impl IntoResponse {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "Data tidak valid",
            "errors": {
                "email": ["Email sudah terdaftar"],
                "name": ["Nama wajib diisi", "Nama terlalu pendek"]
            }
        })),
    )
}

async fn payments_broken() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>upstream exploded</html>")
}

async fn notifications_unauthorized() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthenticated." })))
}

async fn read_all() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn delete_notification(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({ "message": "Notifikasi dihapus" }))
}

#[tokio::test]
async fn test_bearer_token_and_request_id_are_attached() {
    // Arrange
    let recorder = Recorder::default();
    let base_url = spawn_backend(router(recorder.clone())).await;
    let api = client(&base_url, logged_in("tok-123"));

    // Act
    let user = api.me().await.unwrap();
    api.me().await.unwrap();

    // Assert
    assert_eq!(user, resident());
    let authorization = recorder.authorization.lock().clone();
    assert_eq!(authorization, vec![Some("Bearer tok-123".to_string()); 2]);

    let ids = recorder.request_ids.lock().clone();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1], "every request gets its own id");
}

#[tokio::test]
async fn test_no_authorization_header_without_session() {
    let recorder = Recorder::default();
    let base_url = spawn_backend(router(recorder.clone())).await;
    let api = client(&base_url, Session::in_memory());

    api.me().await.unwrap();

    assert_eq!(recorder.authorization.lock().clone(), vec![None]);
}

#[tokio::test]
async fn test_login_stores_token_for_later_requests() {
    // Arrange
    let recorder = Recorder::default();
    let base_url = spawn_backend(router(recorder.clone())).await;
    let session = Session::in_memory();
    let api = client(&base_url, session.clone());

    // Act
    let auth = api
        .login("budi@warga.id".to_string(), "rahasia123".to_string())
        .await
        .unwrap();
    api.me().await.unwrap();

    // Assert
    assert_eq!(auth.token, "tok-fresh");
    assert_eq!(session.token().as_deref(), Some("tok-fresh"));
    assert_eq!(
        recorder.authorization.lock().last().cloned().flatten().as_deref(),
        Some("Bearer tok-fresh")
    );
}

#[tokio::test]
async fn test_rejected_login_keeps_backend_message() {
    let base_url = spawn_backend(router(Recorder::default())).await;
    let session = Session::in_memory();
    let api = client(&base_url, session.clone());

    let err = api
        .login("budi@warga.id".to_string(), "salah-sekali".to_string())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(matches!(&err, AppError::Http { message, .. } if message == "Email atau kata sandi salah"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_fee_query_is_sent_as_parameters() {
    let recorder = Recorder::default();
    let base_url = spawn_backend(router(recorder.clone())).await;
    let api = client(&base_url, logged_in("tok-123"));

    let fees = api
        .list_fees(FeeQuery {
            status: Some(FeeStatus::Unpaid),
            year: Some(2025),
        })
        .await
        .unwrap();

    assert_eq!(fees.len(), 1);
    let query = recorder.queries.lock()[0].clone();
    assert_eq!(query.get("status").map(String::as_str), Some("unpaid"));
    assert_eq!(query.get("year").map(String::as_str), Some("2025"));
}

#[tokio::test]
async fn test_conflict_uses_backend_message() {
    let base_url = spawn_backend(router(Recorder::default())).await;
    let api = client(&base_url, logged_in("tok-123"));

    let request = GenerateFeesRequest {
        month: 3,
        year: 2025,
        amount: 150_000,
        due_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        description: None,
    };
    let err = api.generate_fees(&request).await.unwrap_err();

    assert_eq!(err.status(), Some(409));
    let info = classify(&err);
    assert_eq!(info.message, "Iuran periode ini sudah dibuat");
    assert_eq!(route(&info), Presentation::Toast);
}

#[tokio::test]
async fn test_validation_errors_keep_field_messages() {
    let base_url = spawn_backend(router(Recorder::default())).await;
    let api = client(&base_url, logged_in("tok-123"));

    let err = api.list_users().await.unwrap_err();

    let AppError::Http { status, field_errors, .. } = &err else {
        panic!("expected an HTTP error, got {:?}", err);
    };
    assert_eq!(*status, 422);
    assert_eq!(field_errors["name"].len(), 2);
    assert_eq!(classify(&err).details, vec!["Email sudah terdaftar", "Nama wajib diisi"]);
}

#[tokio::test]
async fn test_unparseable_error_body_falls_back_to_status() {
    let base_url = spawn_backend(router(Recorder::default())).await;
    let api = client(&base_url, logged_in("tok-123"));

    let err = api.list_payments().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    assert!(err.is_transient());
    assert_eq!(route(&classify(&err)), Presentation::Banner);
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    // Arrange
    let base_url = spawn_backend(router(Recorder::default())).await;
    let session = logged_in("tok-expired");
    let api = client(&base_url, session.clone());
    assert!(session.is_authenticated());

    // Act
    let err = api.list_notifications().await.unwrap_err();

    // Assert
    assert!(err.is_unauthorized());
    assert!(!session.is_authenticated());
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_bodies_without_data_decode_as_unit() {
    let base_url = spawn_backend(router(Recorder::default())).await;
    let api = client(&base_url, logged_in("tok-123"));

    tokio_test::assert_ok!(api.mark_all_notifications_read().await);
    tokio_test::assert_ok!(api.delete_notification("n-1").await);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transient_network_error() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}/api", addr), logged_in("tok-123"));
    let err = api.me().await.unwrap_err();

    assert!(matches!(err, AppError::Network(_)), "got {:?}", err);
    assert!(err.is_transient());
    assert_eq!(route(&classify(&err)), Presentation::Banner);
}

#[tokio::test]
async fn test_slow_backend_times_out_as_retryable_toast() {
    // Arrange
    let base_url = spawn_backend(router(Recorder::default())).await;
    let api = ApiClient::with_timeout(&base_url, Duration::from_millis(100), logged_in("tok-123")).unwrap();

    // Act
    let err = api.get_fee("fee-3").await.unwrap_err();

    // Assert
    assert!(matches!(err, AppError::Timeout(_)), "got {:?}", err);
    assert!(err.is_transient());
    let info = classify(&err);
    assert_eq!(info.status, Some(408));
    assert_eq!(route(&info), Presentation::Toast);
}

#[tokio::test]
async fn test_local_validation_runs_before_any_request() {
    let recorder = Recorder::default();
    let base_url = spawn_backend(router(recorder.clone())).await;
    let api = client(&base_url, Session::in_memory());

    let err = api
        .login("bukan-email".to_string(), "rahasia123".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(recorder.authorization.lock().is_empty());
}
