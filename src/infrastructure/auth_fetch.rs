// Authenticated HTTP calls against the analytics backend
use crate::application::session::SessionStore;
use crate::error::{ApiError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthFetcher {
    client: Client,
    base_url: String,
    sessions: Arc<dyn SessionStore>,
}

impl AuthFetcher {
    pub fn new(client: Client, base_url: &str, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            sessions,
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request with the session's bearer token.
    ///
    /// Fails with [`ApiError::NoSession`] before touching the network when
    /// nobody is signed in. Non-2xx responses become [`ApiError::Http`] with
    /// the response body.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let session = self
            .sessions
            .current_session()
            .await
            .ok_or(ApiError::NoSession)?;

        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {}", session.access_token));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Could not read error body from {}: {}", url, e);
                    String::new()
                }
            };
            tracing::error!("Request to {} failed with status {}: {}", url, status, body);
            return Err(ApiError::Http { status, body });
        }

        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.send::<()>(Method::GET, path, query, None).await?;
        decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, &[], Some(body)).await?;
        decode(response).await
    }

    /// POST without a body, ignoring the response payload
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::POST, path, &[], None).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::session::{InMemorySessionStore, Session};
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub(crate) async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn fetcher(base_url: &str, token: Option<&str>) -> AuthFetcher {
        let sessions = Arc::new(InMemorySessionStore::new(token.map(Session::new)));
        AuthFetcher::new(Client::new(), base_url, sessions)
    }

    async fn echo_headers(headers: HeaderMap) -> Json<Value> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(json!({
            "authorization": header("authorization"),
            "contentType": header("content-type"),
        }))
    }

    #[tokio::test]
    async fn test_missing_session_fails_before_network() {
        // Nothing listens on port 9; a network attempt would yield a transport error.
        let fetcher = fetcher("http://127.0.0.1:9", None);
        let err = fetcher
            .get_json::<Value>("/api/analytics/overview", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NoSession));
        assert_eq!(err.to_string(), "No authenticated session. Please sign in again.");
    }

    #[tokio::test]
    async fn test_bearer_token_and_content_type() {
        let base = spawn_stub(
            Router::new().route("/echo", get(echo_headers).post(echo_headers)),
        )
        .await;
        let fetcher = fetcher(&format!("{}/", base), Some("secret-token"));

        let got: Value = fetcher.get_json("/echo", &[]).await.unwrap();
        assert_eq!(got["authorization"], "Bearer secret-token");
        assert_eq!(got["contentType"], Value::Null);

        let posted: Value = fetcher.post_json("echo", &json!({"a": 1})).await.unwrap();
        assert_eq!(posted["authorization"], "Bearer secret-token");
        assert_eq!(posted["contentType"], "application/json");
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let base = spawn_stub(Router::new().route(
            "/broken",
            get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "database exploded") }),
        ))
        .await;
        let fetcher = fetcher(&base, Some("t"));

        let err = fetcher.get_json::<Value>("/broken", &[]).await.unwrap_err();
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "database exploded");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreadable_error_body_still_reports_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // announces more body than it sends, then hangs up
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial")
                .await;
        });
        let fetcher = fetcher(&format!("http://{}", addr), Some("t"));

        let err = fetcher.get_json::<Value>("/broken", &[]).await.unwrap_err();
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert!(body.is_empty());
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let fetcher = fetcher("https://api.example.com/", None);
        assert_eq!(
            fetcher.url("/api/countries"),
            "https://api.example.com/api/countries"
        );
        assert_eq!(fetcher.url("api/countries"), "https://api.example.com/api/countries");
    }
}
