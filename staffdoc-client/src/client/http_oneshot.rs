// staffdoc-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory dispatch
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ListQuery;
use tower::ServiceExt;

use super::http::{HttpClient, ListPage, TOTAL_COUNT_HEADER};
use crate::{ClientError, ClientResult};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum `Router` through tower's `oneshot`, so a backend living in
/// the same process can be used without a socket. The test suite uses this
/// with a fake backend.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use staffdoc_client::OneshotHttpClient;
///
/// let router: Router = build_backend();
/// let client = OneshotHttpClient::new(router);
/// let employee: Employee = client.get("/employees/1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// `router` must already have its state attached
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn build_request(method: Method, uri: String, body: Option<Vec<u8>>) -> ClientResult<Request<Body>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    /// Run the request and return headers and body of a successful response
    async fn execute(
        &self,
        method: Method,
        path: &str,
        uri: String,
        body: Option<Vec<u8>>,
    ) -> ClientResult<(HeaderMap, Bytes)> {
        tracing::info!("API request: {} {}", method, path);
        let request = Self::build_request(method, uri, body)?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.map_err(|e| {
            tracing::error!("API error: {}", e);
            ClientError::Internal(format!("Failed to read body: {}", e))
        })?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).to_string();
            tracing::error!("API error: {}", text);
            return Err(ClientError::from_status(status, text));
        }
        Ok((parts.headers, bytes))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::error!("API error: {}", e);
            ClientError::InvalidResponse(format!("JSON parse error: {}", e))
        })
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let (_, bytes) = self.execute(Method::GET, path, path.to_string(), None).await?;
        Self::decode(&bytes)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ClientResult<ListPage<T>> {
        let uri = format!("{}?{}", path, query.to_query_string());
        let (headers, bytes) = self.execute(Method::GET, path, uri, None).await?;
        let total_count = headers
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(ListPage {
            items: Self::decode(&bytes)?,
            total_count,
        })
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_vec(body)?;
        let (_, bytes) = self
            .execute(Method::POST, path, path.to_string(), Some(body))
            .await?;
        Self::decode(&bytes)
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_vec(body)?;
        let (_, bytes) = self
            .execute(Method::PUT, path, path.to_string(), Some(body))
            .await?;
        Self::decode(&bytes)
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        self.execute(Method::DELETE, path, path.to_string(), None).await?;
        Ok(())
    }
}
