//! REST client for the InstaDev API.
//!
//! [`ApiClient`] owns the process-wide default `Authorization` value and
//! hands fully-described [`ApiRequest`]s to a [`Transport`]. The production
//! transport is [`http::HttpTransport`]; tests swap in a recording fake.

pub mod http;
pub mod routes;

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, always starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `Value::Null` when the body was empty or not JSON.
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn server_message(&self) -> Option<String> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    bearer: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            bearer: Arc::new(RwLock::new(None)),
        }
    }

    pub fn has_bearer(&self) -> bool {
        self.bearer.read().is_some()
    }

    #[cfg(test)]
    pub fn bearer(&self) -> Option<String> {
        self.bearer.read().clone()
    }

    /// Sets or clears the credential attached to every later request. Only
    /// the session store calls this.
    pub(crate) fn set_bearer(&self, credential: Option<String>) {
        *self.bearer.write() = credential;
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Vec<(String, String)>) -> Result<T> {
        let response = self.send(Method::GET, path, query, None).await?;
        decode(response)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body).map_err(|err| ClientError::Decode(err.to_string()))?;
        let response = self.send(Method::POST, path, Vec::new(), Some(body)).await?;
        decode(response)
    }

    /// POST whose response body is ignored.
    pub async fn post_empty(&self, path: &str, body: Option<Value>) -> Result<()> {
        self.send(Method::POST, path, Vec::new(), body).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query,
            body,
            bearer: self.bearer.read().clone(),
        };
        tracing::debug!(method = %request.method, path = %request.path, "api request");

        let response = self.transport.execute(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            tracing::debug!(status = response.status, path, "api request rejected");
            Err(ClientError::status(response.status, response.server_message()))
        }
    }
}

fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T> {
    serde_json::from_value(response.body).map_err(|err| ClientError::Decode(err.to_string()))
}
