use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use visitor_types::api::{CreateMessageRequest, ErrorResponse, Message, VisitorCount};

use crate::error::ClientError;

/// Thin wrapper over the four `/api` calls. No retries, no caching.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn visitor_count(&self) -> Result<VisitorCount, ClientError> {
        let resp = self.http.get(self.url("/api/visitors")).send().await?;
        decode(resp).await
    }

    pub async fn increment_visitor_count(&self) -> Result<VisitorCount, ClientError> {
        let resp = self.http.post(self.url("/api/visitors")).send().await?;
        decode(resp).await
    }

    pub async fn messages(&self) -> Result<Vec<Message>, ClientError> {
        let resp = self.http.get(self.url("/api/messages")).send().await?;
        decode(resp).await
    }

    pub async fn create_message(&self, req: &CreateMessageRequest) -> Result<Message, ClientError> {
        let resp = self.http.post(self.url("/api/messages")).json(req).send().await?;
        decode(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        return Err(ClientError::Status { status, message });
    }

    Ok(resp.json().await?)
}
