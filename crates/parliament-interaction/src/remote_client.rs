//! HTTP client for a remote council backend.
//!
//! Speaks the `/api/meetings` protocol: create, fetch, start the
//! deliberation, analyze one idea by index, finalize and fetch the report.
//! Error responses carry `{"detail": "..."}`; a 404 becomes `NotFound`
//! and every other failure a `Remote` error with the status code.

use async_trait::async_trait;
use parliament_core::error::{ParliamentError, Result};
use parliament_core::meeting::{CouncilBackend, FinalReport, Idea, Meeting, MeetingRequest};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub struct RemoteCouncilClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct StartDeliberationResponse {
    ideas: Vec<Idea>,
}

#[derive(Deserialize)]
struct AnalyzeIdeaResponse {
    analyzed_idea: Idea,
}

#[derive(Deserialize)]
struct FinalizeResponse {
    final_report: FinalReport,
}

#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

impl RemoteCouncilClient {
    /// `base_url` is the server root, e.g. `http://localhost:8001`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParliamentError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/meetings{path}", self.base_url)
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, meeting_id: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).send().await.map_err(transport_error)?;
        decode(response, meeting_id).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, meeting_id: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        decode(response, meeting_id).await
    }
}

fn transport_error(err: reqwest::Error) -> ParliamentError {
    ParliamentError::remote(None, format!("request failed: {err}"))
}

async fn decode<T: DeserializeOwned>(response: Response, meeting_id: &str) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| ParliamentError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        });
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorDetail>(&body)
        .map(|d| d.detail)
        .unwrap_or(body);
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ParliamentError::not_found("meeting", meeting_id));
    }
    if detail.contains("not yet finalized") {
        return Err(ParliamentError::NotFinalized(meeting_id.to_string()));
    }
    Err(ParliamentError::remote(Some(status.as_u16()), detail))
}

#[async_trait]
impl CouncilBackend for RemoteCouncilClient {
    async fn create_meeting(&self, request: MeetingRequest) -> Result<Meeting> {
        request.validate()?;
        let response = self
            .client
            .post(self.url(""))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response, "").await
    }

    async fn get_meeting(&self, meeting_id: &str) -> Result<Meeting> {
        self.get(&format!("/{meeting_id}"), meeting_id).await
    }

    async fn start_deliberation(&self, meeting_id: &str) -> Result<Vec<Idea>> {
        let response: StartDeliberationResponse = self
            .post(&format!("/{meeting_id}/start-deliberation"), meeting_id)
            .await?;
        Ok(response.ideas)
    }

    async fn analyze_idea(&self, meeting_id: &str, index: usize) -> Result<Idea> {
        let response: AnalyzeIdeaResponse = self
            .post(&format!("/{meeting_id}/analyze-idea/{index}"), meeting_id)
            .await?;
        Ok(response.analyzed_idea)
    }

    async fn finalize(&self, meeting_id: &str) -> Result<FinalReport> {
        let response: FinalizeResponse = self
            .post(&format!("/{meeting_id}/finalize"), meeting_id)
            .await?;
        Ok(response.final_report)
    }

    async fn final_report(&self, meeting_id: &str) -> Result<FinalReport> {
        self.get(&format!("/{meeting_id}/report"), meeting_id).await
    }
}
