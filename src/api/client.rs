// ABOUTME: Notification API seam and its reqwest-backed implementation
// Every call builds a URL under the configured base, sends JSON, and maps non-2xx to ApiError

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::error::{ApiError, Result};
use crate::config::ApiConfig;
use crate::models::{NewNotification, Notification};

/// Tracing target for API client operations.
pub const TRACING_TARGET: &str = "notify_panel::api";

const NOTIFICATIONS: &str = "notifications";

/// Remote notification store.
///
/// Implementations own transport details; callers only see records and
/// [`ApiError`]s with a human-readable message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// `GET notifications`
    async fn list(&self) -> Result<Vec<Notification>>;

    /// `POST notifications`. Any 2xx counts as created; the body is only logged.
    async fn create(&self, payload: &NewNotification) -> Result<()>;

    /// `DELETE notifications/{id}`
    async fn delete(&self, id: &str) -> Result<()>;

    /// `DELETE notifications`
    async fn delete_all(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct HttpNotificationApi {
    http: Client,
    base_url: Url,
}

impl HttpNotificationApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidToken)?;
            headers.insert(AUTHORIZATION, value);
        }

        debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_secs = config.timeout_secs,
            "Creating notification API client"
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = error_message(status, &body);
        warn!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            %message,
            "Notification API request failed"
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl NotificationApi for HttpNotificationApi {
    async fn list(&self) -> Result<Vec<Notification>> {
        let url = self.endpoint(&[NOTIFICATIONS])?;
        debug!(target: TRACING_TARGET, %url, "GET notifications");
        let response = self.send(self.http.get(url)).await?;
        Self::read_json(response).await
    }

    async fn create(&self, payload: &NewNotification) -> Result<()> {
        let url = self.endpoint(&[NOTIFICATIONS])?;
        debug!(target: TRACING_TARGET, %url, title = %payload.title, "POST notification");
        let response = self.send(self.http.post(url).json(payload)).await?;
        let status = response.status();
        match response.text().await {
            Ok(body) => debug!(target: TRACING_TARGET, status = status.as_u16(), %body, "Notification created"),
            Err(e) => warn!(target: TRACING_TARGET, "Notification created but body unreadable: {}", e),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&[NOTIFICATIONS, id])?;
        debug!(target: TRACING_TARGET, %url, "DELETE notification");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let url = self.endpoint(&[NOTIFICATIONS])?;
        debug!(target: TRACING_TARGET, %url, "DELETE all notifications");
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Picks the most useful explanation for a failed response: the JSON
/// `message` or `error` field, else the canonical status text.
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "API request failed ({} {})",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationType;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers exactly one request with `status_line` and `body`, after
    /// reading the full request so the client never sees a reset.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/api")
    }

    fn payload() -> NewNotification {
        NewNotification::new(
            "Hello".to_string(),
            "World".to_string(),
            NotificationType::Info,
            "medium".to_string(),
            "all".to_string(),
            None,
            false,
        )
    }

    fn api(base_url: &str) -> HttpNotificationApi {
        HttpNotificationApi::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let url = api("http://localhost:3000/api").endpoint(&["notifications"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/notifications");

        let url = api("http://localhost:3000/api/").endpoint(&["notifications"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/notifications");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let url = api("http://localhost:3000/api")
            .endpoint(&["notifications", "a b/c"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/notifications/a%20b%2Fc");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = HttpNotificationApi::new(&ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let err = HttpNotificationApi::new(&ApiConfig {
            token: Some("abc\ndef".to_string()),
            ..ApiConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[test]
    fn test_error_message_prefers_server_message() {
        let message = error_message(StatusCode::BAD_REQUEST, br#"{"message":"Title is required"}"#);
        assert_eq!(message, "Title is required");

        let message = error_message(StatusCode::NOT_FOUND, br#"{"error":"Notification not found"}"#);
        assert_eq!(message, "Notification not found");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        let message = error_message(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(message, "API request failed (500 Internal Server Error)");

        let message = error_message(StatusCode::BAD_GATEWAY, br#"{"message":"  "}"#);
        assert_eq!(message, "API request failed (502 Bad Gateway)");
    }

    #[tokio::test]
    async fn test_create_accepts_any_success_body() {
        let base_url = serve_once("201 Created", r#"{"message":"Notification created"}"#).await;
        assert!(api(&base_url).create(&payload()).await.is_ok());

        let base_url = serve_once("201 Created", "").await;
        assert!(api(&base_url).create(&payload()).await.is_ok());

        let base_url = serve_once("200 OK", r#"{"data":{"_id":"42"}}"#).await;
        assert!(api(&base_url).create(&payload()).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejection_carries_server_message() {
        let base_url = serve_once("400 Bad Request", r#"{"message":"Title is required"}"#).await;
        let err = api(&base_url).create(&payload()).await.unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "Title is required");
    }
}
