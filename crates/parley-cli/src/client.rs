//! HTTP client for a running parley server

use parley::conversation::MessageEntry;
use parley::server::{RestartResponse, SendMessageRequest, SendMessageResponse};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{CliError, CliResult};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4000";

pub struct RelayClient {
    http: Client,
    base: Url,
}

impl RelayClient {
    pub fn new(server_url: &str) -> CliResult<Self> {
        let mut base = Url::parse(server_url)?;
        // `join` replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub async fn send(&self, request: &SendMessageRequest) -> CliResult<SendMessageResponse> {
        let response = self
            .http
            .post(self.base.join("send-message")?)
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn conversation(&self, user1: &str, user2: &str) -> CliResult<Vec<MessageEntry>> {
        let response = self
            .http
            .get(self.base.join("conversation")?)
            .query(&[("user1", user1), ("user2", user2)])
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn restart(&self) -> CliResult<RestartResponse> {
        let response = self.http.post(self.base.join("restart")?).send().await?;
        Self::parse(response).await
    }

    pub async fn health(&self) -> CliResult<serde_json::Value> {
        let response = self.http.get(self.base.join("health")?).send().await?;
        Self::parse(response).await
    }

    /// Decode a success body, or turn the server's `{"error": ...}` into a CliError
    async fn parse<T: DeserializeOwned>(response: Response) -> CliResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or("unknown error");
        let details = body
            .get("details")
            .and_then(|d| d.as_str())
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();

        Err(CliError(format!("Server returned {status}: {message}{details}")))
    }
}
