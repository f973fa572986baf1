use std::io;

use agent_service::ServiceProfile;
use cinebot::{init_logging, stdout_is_tty, EnvConfig, ProcessTerminal};
use cinebot_chat::config::ChatConfig;
use cinebot_chat::driver::ChatDriver;
use cinebot_chat::runtime::RuntimeController;
use cinebot_chat::services::service_from_config;
use cinebot_chat::session::Session;
use cinebot_chat::view::ChatView;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> io::Result<()> {
    let env = EnvConfig::from_env();
    init_logging(&env).map_err(io::Error::other)?;

    let config = ChatConfig::from_env().map_err(io::Error::other)?;
    let service = service_from_config(&config).map_err(io::Error::other)?;
    let profile = service.profile();
    tracing::info!(
        service = %profile.service_id,
        endpoint = profile.endpoint.as_deref().unwrap_or("-"),
        timeout_sec = config.turn_timeout.as_secs(),
        "starting chat"
    );

    let (runtime, events) = RuntimeController::new(service, config.turn_timeout);
    let view = ChatView::new(ProcessTerminal::new(), env.style(stdout_is_tty()))
        .with_header(header_line(&profile));
    let session = Session::with_welcome(config.welcome);

    let mut driver = ChatDriver::new(session, runtime, events, view);
    driver.run(BufReader::new(tokio::io::stdin())).await
}

fn header_line(profile: &ServiceProfile) -> String {
    match profile.endpoint.as_deref() {
        Some(endpoint) => format!("CineBot · {endpoint}"),
        None => format!("CineBot · {} service", profile.service_id),
    }
}
