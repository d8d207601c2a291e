//! REST client for the container backend.

use crate::config::DashboardConfig;
use async_trait::async_trait;
use cropdeck_core::{
    Container, ContainerCreate, ContainerListResponse, ContainerType, ContainerUpdate,
    ListContainersParams, PerformanceMetrics, Tenant,
};
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
}

impl ApiClientError {
    /// Message shown to the user.
    ///
    /// Server-provided text for HTTP failures, `fallback` for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiClientError::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Operations the dashboard needs from the backend.
#[async_trait]
pub trait ContainerApi: Send + Sync {
    async fn list_containers(
        &self,
        params: &ListContainersParams,
    ) -> Result<ContainerListResponse, ApiClientError>;

    async fn get_container(&self, id: &str) -> Result<Container, ApiClientError>;

    async fn create_container(&self, payload: &ContainerCreate)
        -> Result<Container, ApiClientError>;

    async fn update_container(
        &self,
        id: &str,
        payload: &ContainerUpdate,
    ) -> Result<Container, ApiClientError>;

    async fn delete_container(&self, id: &str) -> Result<(), ApiClientError>;

    async fn performance_metrics(
        &self,
        type_filter: Option<ContainerType>,
    ) -> Result<PerformanceMetrics, ApiClientError>;

    async fn list_tenants(&self) -> Result<Vec<Tenant>, ApiClientError>;
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiClientError> {
        Self::with_base_url(&config.api_base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ApiClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiClientError::Config("api_base_url must not be empty".to_string()));
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(method = "GET", path, params = query.len(), "api request");
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        parse_response(path, response).await
    }

    async fn send_json<T, B>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        tracing::debug!(method = %method, path, "api request");
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        parse_response(path, response).await
    }
}

#[async_trait]
impl ContainerApi for RestClient {
    async fn list_containers(
        &self,
        params: &ListContainersParams,
    ) -> Result<ContainerListResponse, ApiClientError> {
        self.get_json("/containers", &params.to_pairs()).await
    }

    async fn get_container(&self, id: &str) -> Result<Container, ApiClientError> {
        let path = format!("/containers/{}", id);
        self.get_json(&path, &[]).await
    }

    async fn create_container(
        &self,
        payload: &ContainerCreate,
    ) -> Result<Container, ApiClientError> {
        self.send_json(reqwest::Method::POST, "/containers", payload)
            .await
    }

    async fn update_container(
        &self,
        id: &str,
        payload: &ContainerUpdate,
    ) -> Result<Container, ApiClientError> {
        let path = format!("/containers/{}", id);
        self.send_json(reqwest::Method::PUT, &path, payload).await
    }

    async fn delete_container(&self, id: &str) -> Result<(), ApiClientError> {
        let path = format!("/containers/{}", id);
        tracing::debug!(method = "DELETE", path = %path, "api request");
        let response = self.client.delete(self.url(&path)).send().await?;
        ensure_success(&path, response).await.map(|_| ())
    }

    async fn performance_metrics(
        &self,
        type_filter: Option<ContainerType>,
    ) -> Result<PerformanceMetrics, ApiClientError> {
        let query: Vec<(&str, String)> = type_filter
            .map(|t| vec![("type_filter", t.as_str().to_string())])
            .unwrap_or_default();
        self.get_json("/containers/performance", &query).await
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>, ApiClientError> {
        self.get_json("/tenants", &[]).await
    }
}

async fn ensure_success(
    path: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await?;
    let message = error_message(status, text);
    tracing::warn!(path, status = status.as_u16(), %message, "api request failed");
    Err(ApiClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let response = ensure_success(path, response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice::<T>(&bytes)?)
}

/// Body text when present, otherwise the canonical reason phrase.
fn error_message(status: StatusCode, body: String) -> String {
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string())
    } else {
        body
    }
}
