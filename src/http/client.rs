use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::session::core::SessionCore;

/// HTTP client for the backend REST API.
///
/// Every request re-reads the bearer token from the preference store (never
/// cached across requests, so a logout takes effect on the very next call)
/// and every response is inspected for 401, which triggers the global
/// session-expiry policy before the error reaches the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionCore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionCore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()
            .expect("Failed to build HTTP client");

        ApiClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token (when present), send, and apply the global
    /// 401 policy. All request helpers funnel through here.
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let builder = match self.session.persisted_token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let message = Self::error_detail(response).await;
            debug!("Received 401 from backend; expiring session");
            self.session.expire().await;
            return Err(ApiError::Unauthorized { message });
        }

        Ok(response)
    }

    /// Map non-success statuses to `ApiError::Api`, extracting the backend's
    /// `detail` message when the body carries one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = Self::error_detail(response)
            .await
            .unwrap_or_else(|| format!("Unexpected status code: {}", status));
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// The backend reports errors as `{"detail": "..."}`.
    async fn error_detail(response: reqwest::Response) -> Option<String> {
        let body: Value = response.json().await.ok()?;
        body.get("detail")?.as_str().map(str::to_string)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.http.post(self.url(path)).json(body))
            .await?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST with a JSON body where only success matters.
    pub async fn post_json_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .send(self.http.post(self.url(path)).json(body))
            .await?;
        Self::check(response).await.map(drop)
    }

    /// Bodyless POST where only success matters.
    pub async fn post_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(self.http.post(self.url(path))).await?;
        Self::check(response).await.map(drop)
    }

    /// Bodyless PUT where only success matters.
    pub async fn put_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(self.http.put(self.url(path))).await?;
        Self::check(response).await.map(drop)
    }
}
