use std::sync::Arc;

use agent_service::{AgentService, ServiceInitError};
use agent_service_http::{HttpAgentService, HttpAgentServiceConfig};
use agent_service_mock::MockAgentService;

use crate::config::{ChatConfig, ServiceKind};

pub fn service_from_config(config: &ChatConfig) -> Result<Arc<dyn AgentService>, ServiceInitError> {
    match config.service {
        ServiceKind::Http => {
            let http_config = HttpAgentServiceConfig::new(config.endpoint.clone())
                .with_timeout(config.turn_timeout)
                .with_headers(config.headers.clone());
            Ok(Arc::new(HttpAgentService::new(http_config)?))
        }
        ServiceKind::Mock => Ok(Arc::new(MockAgentService::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT;

    #[test]
    fn http_service_uses_configured_endpoint() {
        let service = service_from_config(&ChatConfig::default()).expect("http service");
        let profile = service.profile();

        assert_eq!(profile.service_id, "http");
        assert_eq!(profile.endpoint.as_deref(), Some(DEFAULT_ENDPOINT));
    }

    #[test]
    fn mock_service_resolves() {
        let config = ChatConfig {
            service: ServiceKind::Mock,
            ..ChatConfig::default()
        };
        let service = service_from_config(&config).expect("mock service");
        assert_eq!(service.profile().service_id, "mock");
    }

    #[test]
    fn malformed_endpoint_fails_initialization() {
        let config = ChatConfig {
            endpoint: "not a url".to_string(),
            ..ChatConfig::default()
        };
        let error = match service_from_config(&config) {
            Ok(_) => panic!("malformed endpoint should fail"),
            Err(error) => error,
        };

        assert!(error.message().contains("invalid base URL"));
    }
}
