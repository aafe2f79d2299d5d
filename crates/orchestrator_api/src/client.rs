use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;

use crate::config::OrchestratorConfig;
use crate::error::{parse_error_message, OrchestratorApiError};
use crate::events::RunResponse;
use crate::headers::build_headers;
use crate::payload::RunRequest;
use crate::url::{normalize_health_url, normalize_run_url};

#[derive(Debug)]
pub struct OrchestratorClient {
    http: Client,
    config: OrchestratorConfig,
}

/// Body of the orchestrator `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

impl OrchestratorClient {
    pub fn new(config: OrchestratorConfig) -> Result<Self, OrchestratorApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(OrchestratorApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn run_endpoint(&self) -> String {
        normalize_run_url(&self.config.base_url)
    }

    pub fn health_endpoint(&self) -> String {
        normalize_health_url(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, OrchestratorApiError> {
        let headers = build_headers(&self.config, None);
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    OrchestratorApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    OrchestratorApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    /// Builds the run request for one user message.
    ///
    /// The text is carried verbatim; only emptiness is checked.
    pub fn run_request(
        &self,
        text: &str,
        session_id: &str,
    ) -> Result<RunRequest, OrchestratorApiError> {
        if text.trim().is_empty() {
            return Err(OrchestratorApiError::EmptyMessage);
        }
        if session_id.trim().is_empty() {
            return Err(OrchestratorApiError::MissingSessionId);
        }

        Ok(RunRequest::new(
            self.config.app_name.trim(),
            self.config.user_id.trim(),
            session_id,
            text,
        ))
    }

    pub fn build_request(
        &self,
        request: &RunRequest,
    ) -> Result<reqwest::RequestBuilder, OrchestratorApiError> {
        validate_request(request)?;

        let headers = self.build_headers()?;
        let body = serde_json::to_vec(request).map_err(OrchestratorApiError::Serialize)?;
        Ok(self
            .http
            .post(self.run_endpoint())
            .headers(headers)
            .body(body))
    }

    /// Sends one run request and parses the response. No retry is attempted.
    pub async fn send(&self, request: &RunRequest) -> Result<RunResponse, OrchestratorApiError> {
        let endpoint = self.run_endpoint();
        tracing::debug!(
            endpoint = %endpoint,
            session_id = %request.session_id,
            "sending run request"
        );

        let response = self.build_request(request)?.send().await?;
        let body = read_success_body(response).await?;
        let response = RunResponse::from_value(&body);

        tracing::debug!(events = response.events.len(), "run response parsed");
        Ok(response)
    }

    /// Sends `text` for `session_id` and returns the extracted reply.
    ///
    /// Resolves to [`crate::FALLBACK_REPLY`] when the response is valid JSON
    /// without any text fragment.
    pub async fn send_turn(
        &self,
        text: &str,
        session_id: &str,
    ) -> Result<String, OrchestratorApiError> {
        let request = self.run_request(text, session_id)?;
        let response = self.send(&request).await?;
        match response.reply_text() {
            Some(reply) => Ok(reply.to_owned()),
            None => {
                tracing::warn!("run response carried no text fragment; using fallback reply");
                Ok(response.reply_or_fallback())
            }
        }
    }

    /// Probes the orchestrator `/health` endpoint.
    pub async fn health(&self) -> Result<HealthStatus, OrchestratorApiError> {
        let headers = self.build_headers()?;
        let response = self
            .http
            .get(self.health_endpoint())
            .headers(headers)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        Ok(serde_json::from_value(body)?)
    }
}

fn validate_request(request: &RunRequest) -> Result<(), OrchestratorApiError> {
    if request.app_name.trim().is_empty() {
        return Err(OrchestratorApiError::MissingAppName);
    }
    if request.user_id.trim().is_empty() {
        return Err(OrchestratorApiError::MissingUserId);
    }
    if request.session_id.trim().is_empty() {
        return Err(OrchestratorApiError::MissingSessionId);
    }
    if request.text().map_or(true, |text| text.trim().is_empty()) {
        return Err(OrchestratorApiError::EmptyMessage);
    }

    Ok(())
}

async fn read_success_body(response: Response) -> Result<Value, OrchestratorApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        return Err(OrchestratorApiError::Status(
            status,
            parse_error_message(status, &body),
        ));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice::<Value>(&bytes)?)
}
