//! Blocking HTTP implementation of the alert API
//!
//! Talks to the OpsGenie Alert API v2 over a reqwest blocking client
//! with one request timeout applied to every call.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::api::{AlertSummary, OpsGenieApi};
use super::types::{
    AddDetailsRequest, AddNoteRequest, CloseAlertRequest, CreateAlertRequest, RequestId,
    ALERT_SOURCE,
};
use crate::error::ApiError;

/// API base for the US region
pub const US_API_BASE: &str = "https://api.opsgenie.com";
/// API base for the EU region
pub const EU_API_BASE: &str = "https://api.eu.opsgenie.com";

/// Envelope returned by mutating calls (the API processes them
/// asynchronously and answers with a request id)
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default, rename = "requestId")]
    request_id: String,
}

/// Envelope around an alert lookup
#[derive(Debug, Deserialize)]
struct GetAlertResponse {
    data: AlertSummary,
}

/// OpsGenie Alert API v2 client
#[derive(Debug)]
pub struct OpsGenieClient {
    http: Client,
    base: Url,
    auth_token: String,
}

impl OpsGenieClient {
    /// Build a client for the given API base
    pub fn new(base_url: &str, auth_token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base,
            auth_token: auth_token.to_string(),
        })
    }

    /// Join path segments onto the base URL.
    ///
    /// Segments are percent-encoded, so an alias containing `/` stays a
    /// single identifier instead of splitting the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn auth_header(&self) -> String {
        format!("GenieKey {}", self.auth_token)
    }

    /// Reject non-success statuses, keeping the response body for context
    fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ApiError::Status { status, body })
    }

    /// Decode a success response body
    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json().map_err(|e| {
            if e.is_decode() {
                ApiError::UnexpectedPayload(e.to_string())
            } else {
                ApiError::Transport(e)
            }
        })
    }

    fn submitted(response: Response) -> Result<RequestId, ApiError> {
        let body: SubmitResponse = Self::decode(Self::check(response)?)?;
        Ok(RequestId(body.request_id))
    }
}

impl OpsGenieApi for OpsGenieClient {
    fn create(&self, request: &CreateAlertRequest) -> Result<RequestId, ApiError> {
        let url = self.endpoint(&["v2", "alerts"])?;
        debug!("POST {} alias={:?}", url, request.alias);
        let response = self
            .http
            .post(url)
            .header("Authorization", self.auth_header())
            .json(request)
            .send()?;
        Self::submitted(response)
    }

    fn get(&self, alias: &str) -> Result<Option<AlertSummary>, ApiError> {
        let url = self.endpoint(&["v2", "alerts", alias])?;
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .query(&[("identifierType", "alias")])
            .header("Authorization", self.auth_header())
            .send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: GetAlertResponse = Self::decode(Self::check(response)?)?;
        Ok(Some(body.data))
    }

    fn close(&self, alert_id: &str, note: &str) -> Result<RequestId, ApiError> {
        let url = self.endpoint(&["v2", "alerts", alert_id, "close"])?;
        debug!("POST {}", url);
        let body = CloseAlertRequest {
            source: ALERT_SOURCE.to_string(),
            note: note.to_string(),
        };
        let response = self
            .http
            .post(url)
            .query(&[("identifierType", "id")])
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()?;
        Self::submitted(response)
    }

    fn add_note(&self, alert_id: &str, note: &str) -> Result<RequestId, ApiError> {
        let url = self.endpoint(&["v2", "alerts", alert_id, "notes"])?;
        debug!("POST {}", url);
        let body = AddNoteRequest {
            source: ALERT_SOURCE.to_string(),
            note: note.to_string(),
        };
        let response = self
            .http
            .post(url)
            .query(&[("identifierType", "id")])
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()?;
        Self::submitted(response)
    }

    fn add_details(
        &self,
        alert_id: &str,
        details: &HashMap<String, String>,
    ) -> Result<RequestId, ApiError> {
        let url = self.endpoint(&["v2", "alerts", alert_id, "details"])?;
        debug!("POST {}", url);
        let body = AddDetailsRequest {
            source: ALERT_SOURCE.to_string(),
            details: details.clone(),
        };
        let response = self
            .http
            .post(url)
            .query(&[("identifierType", "id")])
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()?;
        Self::submitted(response)
    }

    fn ping(&self, heartbeat: &str) -> Result<Duration, ApiError> {
        let url = self.endpoint(&["v2", "heartbeats", heartbeat, "ping"])?;
        debug!("GET {}", url);
        let started = Instant::now();
        let response = self
            .http
            .get(url)
            .header("Authorization", self.auth_header())
            .send()?;
        Self::check(response)?;
        Ok(started.elapsed())
    }
}
