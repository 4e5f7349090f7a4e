// staffdoc-client/src/client/http.rs
// HTTP transport - network implementation

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ListQuery;

use crate::{ClientConfig, ClientError, ClientResult};

/// Response header carrying the total record count of a paginated list
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Raw `x-total-count` header value, if the backend sent one
    pub total_count: Option<String>,
}

/// HTTP client trait
///
/// Paths are absolute (`/employees/3`). Every implementation logs the method
/// and path of each request and the body or message of each failure, then
/// returns the failure unchanged.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ClientResult<ListPage<T>>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// DELETE; the response body is ignored
    async fn delete(&self, path: &str) -> ClientResult<()>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout_duration())
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send the request and turn non-success statuses into errors
    async fn execute(&self, method: Method, path: &str, req: RequestBuilder) -> ClientResult<Response> {
        tracing::info!("API request: {} {}", method, path);

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API error: {}", e);
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if text.is_empty() {
                tracing::error!("API error: {} {} failed with status {}", method, path, status);
            } else {
                tracing::error!("API error: {}", text);
            }
            return Err(ClientError::from_status(status, text));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        response.json().await.map_err(|e| {
            tracing::error!("API error: {}", e);
            ClientError::from(e)
        })
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.client.get(self.url(path));
        let response = self.execute(Method::GET, path, req).await?;
        Self::decode(response).await
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ClientResult<ListPage<T>> {
        let url = format!("{}?{}", self.url(path), query.to_query_string());
        let req = self.client.get(url);
        let response = self.execute(Method::GET, path, req).await?;

        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let items = Self::decode(response).await?;
        Ok(ListPage { items, total_count })
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).json(body);
        let response = self.execute(Method::POST, path, req).await?;
        Self::decode(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.client.put(self.url(path)).json(body);
        let response = self.execute(Method::PUT, path, req).await?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let req = self.client.delete(self.url(path));
        self.execute(Method::DELETE, path, req).await?;
        Ok(())
    }
}
