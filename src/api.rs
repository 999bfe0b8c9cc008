use anyhow::{Context, Result};
use serde::Deserialize;
use std::future::Future;

use crate::config::Config;
use crate::error::SearchError;
use crate::models::JobRecord;

// --- Search trait ---

/// Anything that can turn query params into a batch of jobs.
pub trait JobSearch: Send + Sync + 'static {
    fn search(
        &self,
        params: Vec<(String, String)>,
    ) -> impl Future<Output = std::result::Result<Vec<JobRecord>, SearchError>> + Send;
}

#[derive(Debug, Deserialize)]
struct JobsResponse {
    #[serde(default)]
    jobs: Option<Vec<JobRecord>>,
}

/// Parses a response body. A body without `jobs` is an empty batch.
pub fn parse_jobs(body: &str) -> std::result::Result<Vec<JobRecord>, SearchError> {
    let response: JobsResponse = serde_json::from_str(body)?;
    Ok(response.jobs.unwrap_or_default())
}

// --- HTTP client ---

#[derive(Debug, Clone)]
pub struct JobsApiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_host: String,
}

impl JobsApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?.to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            api_host: config.api_host.clone(),
        })
    }
}

impl JobSearch for JobsApiClient {
    async fn search(
        &self,
        params: Vec<(String, String)>,
    ) -> std::result::Result<Vec<JobRecord>, SearchError> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        tracing::debug!(url = %request.url(), "Requesting jobs");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Jobs API error response");
            return Err(SearchError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let jobs = parse_jobs(&body)?;
        tracing::debug!(count = jobs.len(), "Jobs API returned batch");
        Ok(jobs)
    }
}
