//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! Every request goes through [`ApiClient::send`], which plays the role of a
//! request/response interceptor pair:
//!
//! - **Outgoing**: bearer token from the [`Session`], `X-Request-Id` stamp,
//!   JSON body.
//! - **Incoming**: `{ "data": ... }` envelope unwrapped on 2xx; any other
//!   status normalized into [`AppError::Http`] using the backend's error body;
//!   401 clears the session.

use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ErrorResponse;

use crate::core::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::core::session::Session;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for communicating with the backend API server.
///
/// Cloning is cheap: the connection pool and the session are shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a new API client from validated configuration.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        config.validate()?;
        Self::with_timeout(&config.api_url, config.timeout, session)
    }

    /// Create a client for `base_url` with an explicit timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration, session: Session) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send::<(), T>(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, &[], body).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub(crate) async fn patch<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send::<(), T>(Method::PATCH, path, &[], None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send::<(), ()>(Method::DELETE, path, &[], None).await
    }

    /// Send a request and unwrap the success envelope.
    pub(crate) async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        let start = Instant::now();

        let mut request = self.client.request(method.clone(), self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = self.authorize(request, &request_id);

        let response = request.send().await.map_err(|e| {
            let err = AppError::from(e);
            tracing::error!(
                method = %method,
                path = %path,
                request_id = %request_id,
                duration_ms = start.elapsed().as_millis(),
                error = %err,
                "Request failed before a response arrived"
            );
            err
        })?;

        let status = response.status();
        tracing::debug!(
            method = %method,
            path = %path,
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis(),
            "Response received"
        );

        self.normalize(status, response).await
    }

    /// Attach the bearer token and request id.
    fn authorize(&self, request: RequestBuilder, request_id: &str) -> RequestBuilder {
        let request = request.header(REQUEST_ID_HEADER, request_id);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn normalize<T>(&self, status: StatusCode, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bytes = response.bytes().await.map_err(AppError::from)?;

        if status.is_success() {
            // 204 and empty bodies decode as `null`, which fits `()` and `Option<_>`
            if bytes.is_empty() {
                return serde_json::from_slice::<T>(b"null").map_err(AppError::from);
            }
            return unwrap_envelope(&bytes).map_err(|e| {
                tracing::error!(status = status.as_u16(), error = %e, "Response parse error");
                e
            });
        }

        let err = match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(body) if !body.message.trim().is_empty() => AppError::Http {
                status: status.as_u16(),
                message: body.message,
                field_errors: body.errors.unwrap_or_default(),
            },
            _ => AppError::from_status(status),
        };

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend rejected the session token, logging out");
            self.session.clear();
        }

        tracing::warn!(status = status.as_u16(), error = %err, "Request rejected");
        Err(err)
    }
}

/// Extract `data` from a [`shared::ApiResponse`] body.
///
/// Bodies without a `data` key (e.g. `{"message":"ok"}` on mutations) decode
/// as `null`.
fn unwrap_envelope<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let data = match serde_json::from_slice::<serde_json::Value>(bytes)? {
        serde_json::Value::Object(mut body) => body.remove("data").unwrap_or(serde_json::Value::Null),
        other => {
            return Err(AppError::Decode(format!(
                "expected a JSON object envelope, got {}",
                other
            )))
        }
    };
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ApiResponse;

    #[test]
    fn test_unwrap_envelope() {
        let body = serde_json::to_vec(&ApiResponse::with_message(vec![1, 2], "ok")).unwrap();
        assert_eq!(unwrap_envelope::<Vec<u8>>(&body).unwrap(), vec![1, 2]);

        unwrap_envelope::<()>(br#"{"message":"Notifikasi dihapus"}"#).unwrap();
        assert!(matches!(unwrap_envelope::<Vec<u8>>(b"[1,2]"), Err(AppError::Decode(_))));
        assert!(matches!(unwrap_envelope::<Vec<u8>>(br#"{"message":"x"}"#), Err(AppError::Decode(_))));
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::with_timeout(
            "http://127.0.0.1:8000/api/",
            Duration::from_secs(1),
            Session::in_memory(),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/api");
        assert_eq!(client.url("/fees"), "http://127.0.0.1:8000/api/fees");
        assert_eq!(client.url("payments/p1/check"), "http://127.0.0.1:8000/api/payments/p1/check");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ClientConfig::default().with_api_url("localhost:8000");
        assert!(matches!(
            ApiClient::new(&config, Session::in_memory()),
            Err(AppError::Config(_))
        ));
    }
}
