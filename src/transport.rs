//! The narrow HTTP seam: send a request, get a status and a body back.
//!
//! Everything above this module speaks `ApiRequest`/`ApiResponse` only, so the
//! checker does not care which HTTP library carries the bytes.
use crate::telemetry::error_chain_fmt;
use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn post<Body: serde::Serialize>(
        path: impl Into<String>,
        body: &Body,
    ) -> Result<Self, serde_json::Error> {
        Self::new(HttpMethod::Post, path).with_json(body)
    }

    pub fn patch<Body: serde::Serialize>(
        path: impl Into<String>,
        body: &Body,
    ) -> Result<Self, serde_json::Error> {
        Self::new(HttpMethod::Patch, path).with_json(body)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    fn with_json<Body: serde::Serialize>(mut self, body: &Body) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(thiserror::Error)]
pub enum TransportError {
    #[error("Failed to build the HTTP client")]
    Client(#[source] BoxError),
    #[error("{method} {url} could not be completed")]
    Request {
        method: HttpMethod,
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("Failed to read the response body of {method} {url}")]
    Body {
        method: HttpMethod,
        url: String,
        #[source]
        source: BoxError,
    },
}

impl std::fmt::Debug for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Non-2xx statuses are valid answers here, never errors.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    base_url: String,
    http_client: Client,
}

impl ReqwestTransport {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| TransportError::Client(Box::new(e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(
        name = "Sending request to the book service",
        skip(self, request),
        fields(method = %request.method, path = %request.path, status = tracing::field::Empty)
    )]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path);
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http_client.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to reach the book service: {:?}", e);
            TransportError::Request {
                method: request.method,
                url: url.clone(),
                source: Box::new(e),
            }
        })?;
        let status = response.status().as_u16();
        tracing::Span::current().record("status", status);
        let body = response.bytes().await.map_err(|e| TransportError::Body {
            method: request.method,
            url,
            source: Box::new(e),
        })?;
        Ok(ApiResponse { status, body })
    }
}
