use std::time::Duration;

use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;

use crate::error::{Result, SmokeError};
use crate::models::{AnalyzeRequest, AnalyzeResponse, HealthStatus};

const BODY_PREVIEW_LIMIT: usize = 200;

/// Client for the profile analysis service.
#[derive(Clone)]
pub struct AnalyzerClient {
    client: Client,
    base_url: String,
}

impl AnalyzerClient {
    /// `timeout = None` leaves requests unbounded.
    pub fn new(base_url: String, timeout: Option<Duration>, user_agent: &str) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn analyze(&self, profile_text: String) -> Result<AnalyzeResponse> {
        let url = self.url("analyze");
        let body = AnalyzeRequest { profile_text };
        tracing::info!(url = %url, bytes = body.profile_text.len(), "analyze: sending request");
        let response = self.client.post(&url).json(&body).send().await?;
        read_json(response).await
    }

    /// Uploads the profile through the multipart route instead of the JSON one.
    pub async fn analyze_file(&self, file_name: String, contents: Vec<u8>) -> Result<AnalyzeResponse> {
        let url = self.url("analyze-file");
        tracing::info!(url = %url, file = %file_name, bytes = contents.len(), "analyze-file: uploading");
        let part = multipart::Part::bytes(contents)
            .file_name(file_name)
            .mime_str("text/plain")?;
        let form = multipart::Form::new().part("file", part);
        let response = self.client.post(&url).multipart(form).send().await?;
        read_json(response).await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.url("health");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SmokeError::Unhealthy { status, body: preview(&body) });
        }
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::warn!(status = %status, body_preview = %preview(&body), "analyzer: non-success response");
    }
    serde_json::from_str(&body).map_err(|source| SmokeError::InvalidResponse {
        status,
        source,
        preview: preview(&body),
    })
}

fn preview(body: &str) -> String {
    if body.chars().count() > BODY_PREVIEW_LIMIT {
        format!("{}…", body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>())
    } else {
        body.to_string()
    }
}
