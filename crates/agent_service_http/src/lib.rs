//! HTTP implementation of the shared `agent_service` contract.
//!
//! Posts each query to the configured `/agent` endpoint through `agent_api` and maps
//! transport failures onto [`AgentError`] variants.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use agent_api::{AgentApiClient, AgentApiConfig, AgentApiError, AgentRequest, AgentResponse};
use agent_service::{
    AgentError, AgentQuery, AgentReply, AgentService, ServiceInitError, ServiceProfile,
};
use async_trait::async_trait;

/// Stable service identifier used by chat startup selection.
pub const HTTP_SERVICE_ID: &str = "http";

/// Runtime configuration for the HTTP agent service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAgentServiceConfig {
    pub endpoint: String,
    pub timeout: Option<Duration>,
    pub headers: BTreeMap<String, String>,
}

impl HttpAgentServiceConfig {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
            headers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    fn into_api_config(self) -> AgentApiConfig {
        let mut config = AgentApiConfig::new(self.endpoint).with_headers(self.headers);
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config
    }
}

#[async_trait]
trait AgentTransport: Send + Sync {
    async fn send(&self, request: &AgentRequest) -> Result<AgentResponse, AgentApiError>;
}

struct ClientTransport {
    client: AgentApiClient,
}

#[async_trait]
impl AgentTransport for ClientTransport {
    async fn send(&self, request: &AgentRequest) -> Result<AgentResponse, AgentApiError> {
        self.client.send(request).await
    }
}

/// Agent service backed by the HTTP `/agent` endpoint.
pub struct HttpAgentService {
    endpoint: String,
    timeout: Option<Duration>,
    transport: Arc<dyn AgentTransport>,
}

impl HttpAgentService {
    /// Creates a service using real HTTP transport.
    pub fn new(config: HttpAgentServiceConfig) -> Result<Self, ServiceInitError> {
        let timeout = config.timeout;
        let client = AgentApiClient::new(config.into_api_config()).map_err(map_init_error)?;
        let endpoint = client.endpoint().to_string();

        Ok(Self {
            endpoint,
            timeout,
            transport: Arc::new(ClientTransport { client }),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[cfg(test)]
    fn with_transport_for_tests(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
        transport: Arc<dyn AgentTransport>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            transport,
        }
    }
}

#[async_trait]
impl AgentService for HttpAgentService {
    fn profile(&self) -> ServiceProfile {
        ServiceProfile {
            service_id: HTTP_SERVICE_ID.to_string(),
            endpoint: Some(self.endpoint.clone()),
        }
    }

    async fn ask(&self, query: AgentQuery) -> Result<AgentReply, AgentError> {
        tracing::debug!(turn_id = query.turn_id, endpoint = %self.endpoint, "posting agent query");
        let request = AgentRequest::new(query.message);

        match self.transport.send(&request).await {
            Ok(response) => {
                tracing::debug!(
                    turn_id = query.turn_id,
                    has_response = response.response.is_some(),
                    tool_used = response.tool_used.as_deref().unwrap_or(""),
                    "agent reply received"
                );
                Ok(AgentReply {
                    response: response.response,
                    tool_used: response.tool_used,
                })
            }
            Err(error) => {
                let error = map_api_error(error, self.timeout);
                tracing::debug!(
                    turn_id = query.turn_id,
                    kind = error.kind().as_str(),
                    %error,
                    "agent query failed"
                );
                Err(error)
            }
        }
    }
}

fn map_init_error(error: AgentApiError) -> ServiceInitError {
    ServiceInitError::new(format!("HTTP agent service initialization failed: {error}"))
}

fn map_api_error(error: AgentApiError, timeout: Option<Duration>) -> AgentError {
    if error.is_timeout() {
        return AgentError::Timeout {
            after: timeout.unwrap_or_default(),
        };
    }

    match error {
        AgentApiError::Request(error) => AgentError::Transport(error.to_string()),
        AgentApiError::Status(status, message) => AgentError::Status {
            status: status.as_u16(),
            message,
        },
        AgentApiError::Decode(error) => AgentError::Decode(error.to_string()),
        other @ (AgentApiError::InvalidBaseUrl(_) | AgentApiError::InvalidHeader(_)) => {
            AgentError::Internal(other.to_string())
        }
    }
}
