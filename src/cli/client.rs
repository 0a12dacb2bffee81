//! Thin HTTP client over the REST API: bearer auth, the `{success, data}`
//! envelope, and readable error messages from the error body.

use anyhow::{anyhow, bail, Context};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::cli::config::{load_client_config, load_session, Session};

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    access_token: Option<String>,
}

impl ApiClient {
    /// Client for public endpoints; uses a stored session token when one
    /// exists.
    pub fn from_config() -> anyhow::Result<Self> {
        let config = load_client_config()?;
        let session = load_session()?;
        Ok(Self {
            base_url: config.server_url,
            http: reqwest::Client::new(),
            access_token: session.map(|s| s.access_token),
        })
    }

    /// Client bound to a specific access token, used right after login
    /// before the session file is written.
    pub fn with_token(access_token: &str) -> anyhow::Result<Self> {
        let config = load_client_config()?;
        Ok(Self {
            base_url: config.server_url,
            http: reqwest::Client::new(),
            access_token: Some(access_token.to_string()),
        })
    }

    /// Client for protected endpoints. Refuses to build without a session -
    /// the CLI's route guard.
    pub fn authenticated() -> anyhow::Result<(Self, Session)> {
        let config = load_client_config()?;
        let session = load_session()?
            .ok_or_else(|| anyhow!("Not logged in. Run 'surveyflow auth login' first"))?;
        let client = Self {
            base_url: config.server_url,
            http: reqwest::Client::new(),
            access_token: Some(session.access_token.clone()),
        };
        Ok((client, session))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> anyhow::Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> anyhow::Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<Value> {
        self.request(Method::DELETE, path, None).await
    }

    /// Liveness probe against /health.
    pub async fn ping(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self
            .http
            .get(&url)
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> anyhow::Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let payload: Value = response
            .json()
            .await
            .with_context(|| format!("invalid JSON from {}", url))?;

        if !status.is_success() {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request failed");
            bail!("{} ({})", message, status.as_u16());
        }

        // Unwrap the success envelope; plain bodies pass through as-is
        Ok(payload.get("data").cloned().unwrap_or(payload))
    }
}
