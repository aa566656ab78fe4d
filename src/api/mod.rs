/// REST backend boundary.
/// 1. One shared client with the blanket request timeout
/// 2. Bearer-token injection from the session
/// 3. Rejection bodies mapped to the crate error taxonomy
// region:    --- Imports
use crate::config::{StoreConfig, REQUEST_TIMEOUT};
use crate::error::{Result, StoreError};
use crate::session::SessionContext;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

pub mod routes;

// endregion: --- Imports

// region:    --- Error Mapping

/// Body fields probed, in order, for a human-readable rejection message.
const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "detail"];

/// Prefer the server's own message over anything generic.
fn rejection_from_body(status: StatusCode, body: &str) -> StoreError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|value| {
            MESSAGE_FIELDS
                .iter()
                .find_map(|field| value.get(field).and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    let code = parsed
        .as_ref()
        .and_then(|value| value.get("code").and_then(Value::as_str))
        .map(str::to_string);
    StoreError::ServerRejection { message, code }
}

fn network_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Network("request timed out".to_string())
    } else {
        StoreError::Network(err.to_string())
    }
}

// endregion: --- Error Mapping

// region:    --- ApiClient

/// HTTP client for the storefront backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build the client from configuration and the loaded session.
    pub fn new(config: &StoreConfig, session: &SessionContext) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(network_error)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: session.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Decode a successful response, or map the rejection body.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| StoreError::Network(format!("invalid response body: {e}")));
        }
        let body = response.text().await.unwrap_or_default();
        warn!("{:<12} --> rejected ({}): {}", "Api", status.as_u16(), body);
        Err(rejection_from_body(status, &body))
    }

    /// Check status only, for endpoints with no useful body.
    async fn expect_ok(response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        warn!("{:<12} --> rejected ({}): {}", "Api", status.as_u16(), body);
        Err(rejection_from_body(status, &body))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        info!("{:<12} --> GET {}", "Api", path);
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(network_error)?;
        Self::decode(response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        info!("{:<12} --> POST {}", "Api", path);
        let response = self
            .authorize(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(network_error)?;
        Self::decode(response).await
    }

    /// POST without a request body, for action endpoints.
    pub async fn post_action(&self, path: &str) -> Result<()> {
        info!("{:<12} --> POST {}", "Api", path);
        let response = self
            .authorize(self.http.post(self.url(path)))
            .send()
            .await
            .map_err(network_error)?;
        Self::expect_ok(response).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        info!("{:<12} --> PUT {}", "Api", path);
        let response = self
            .authorize(self.http.put(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(network_error)?;
        Self::expect_ok(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        info!("{:<12} --> DELETE {}", "Api", path);
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await
            .map_err(network_error)?;
        Self::expect_ok(response).await
    }
}

// endregion: --- ApiClient

// region:    --- Tests


// endregion: --- Tests
