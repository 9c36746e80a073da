use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::transport::{Method, Request, Response, StatusCategory, Transport, TransportError};
use crate::ClientError;

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }
}

/// reqwest-backed transport. Talks JSON to a running label service.
pub struct HttpTransport {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            token: None,
        }
    }

    pub fn with_token(base_url: &str, token: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            token: Some(token),
        }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Config(format!("build http client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Token {token}")),
            None => builder,
        }
    }

    /// Check if the service is reachable.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let resp = self.send(Request::get("/health")).await?;
        match resp.category() {
            StatusCategory::Success => Ok(()),
            _ => Err(ClientError::Remote {
                status: resp.status,
                message: format!("health check failed: {}", resp.error_message()),
            }),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        debug!("{} {}", request.method, request.path);
        let resp = self
            .with_auth(builder)
            .send()
            .await
            .map_err(send_error)?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        debug!("{} {} -> {status}", request.method, request.path);

        Ok(Response::new(status, parse_body(&text)))
    }
}

fn send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::Connection(e.to_string())
    }
}

/// Empty bodies become `None`; non-JSON text is kept as a string so error
/// messages survive.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
