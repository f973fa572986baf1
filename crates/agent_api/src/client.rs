use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::config::AgentApiConfig;
use crate::error::{parse_error_message, AgentApiError};
use crate::headers::build_headers;
use crate::payload::{AgentRequest, AgentResponse};
use crate::url::normalize_agent_url;

#[derive(Debug)]
pub struct AgentApiClient {
    http: Client,
    config: AgentApiConfig,
    endpoint: String,
}

impl AgentApiClient {
    pub fn new(config: AgentApiConfig) -> Result<Self, AgentApiError> {
        let endpoint = normalize_agent_url(&config.base_url);
        let parsed = url::Url::parse(&endpoint)
            .map_err(|error| AgentApiError::InvalidBaseUrl(format!("{endpoint}: {error}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AgentApiError::InvalidBaseUrl(format!(
                "{endpoint}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AgentApiError::from)?;
        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &AgentApiConfig {
        &self.config
    }

    /// Fully normalized `.../agent` URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_headers(&self) -> Result<HeaderMap, AgentApiError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    AgentApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    AgentApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &AgentRequest,
    ) -> Result<reqwest::RequestBuilder, AgentApiError> {
        let headers = self.build_headers()?;
        Ok(self.http.post(&self.endpoint).headers(headers).json(request))
    }

    /// Send one request and decode the success body.
    ///
    /// Non-2xx statuses fail with [`AgentApiError::Status`]. No retries are attempted.
    pub async fn send(&self, request: &AgentRequest) -> Result<AgentResponse, AgentApiError> {
        let response = self.build_request(request)?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = parse_error_message(status, &body);
            tracing::debug!(status = status.as_u16(), %message, "agent request rejected");
            return Err(AgentApiError::Status(status, message));
        }

        Ok(serde_json::from_str::<AgentResponse>(&body)?)
    }
}
