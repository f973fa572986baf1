use std::sync::Arc;
use std::time::Duration;

use agent_service::{AgentError, AgentQuery, AgentReply, AgentService, TurnId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::session::{HostOps, TurnOutcome, TurnRequest};

pub const DEFAULT_TURN_TIMEOUT: Duration = Duration::from_secs(30);

const ERROR_TURN_ALREADY_ACTIVE: &str = "Turn already active";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    TurnFinished {
        turn_id: TurnId,
        outcome: TurnOutcome,
    },
}

/// View work requested by the session since the last drain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewRequests {
    pub scroll_to_latest: bool,
    pub render: bool,
    pub notices: Vec<String>,
    pub stop: bool,
}

impl ViewRequests {
    pub fn is_empty(&self) -> bool {
        !self.scroll_to_latest && !self.render && self.notices.is_empty() && !self.stop
    }
}

struct ActiveTurn {
    turn_id: TurnId,
    handle: JoinHandle<()>,
}

/// Aborts the wrapped task when dropped, so cancelling a turn also stops its agent call.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Runs agent calls for the session, one turn at a time.
///
/// Every call is bounded by the turn timeout. Results come back as [`RuntimeEvent`]s on the
/// channel returned by [`RuntimeController::new`]; the owner applies them to the session and
/// then calls [`RuntimeController::finish_turn`].
pub struct RuntimeController {
    service: Arc<dyn AgentService>,
    turn_timeout: Duration,
    events: mpsc::UnboundedSender<RuntimeEvent>,
    active_turn: Option<ActiveTurn>,
    requests: ViewRequests,
}

impl RuntimeController {
    pub fn new(
        service: Arc<dyn AgentService>,
        turn_timeout: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<RuntimeEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            service,
            turn_timeout,
            events,
            active_turn: None,
            requests: ViewRequests::default(),
        };
        (controller, receiver)
    }

    pub fn turn_timeout(&self) -> Duration {
        self.turn_timeout
    }

    pub fn active_turn(&self) -> Option<TurnId> {
        self.active_turn.as_ref().map(|active| active.turn_id)
    }

    /// Clears the active slot once the outcome for `turn_id` has been applied.
    pub fn finish_turn(&mut self, turn_id: TurnId) {
        if self.active_turn() == Some(turn_id) {
            self.active_turn = None;
        }
    }

    pub fn take_view_requests(&mut self) -> ViewRequests {
        std::mem::take(&mut self.requests)
    }

    /// Aborts any in-flight turn. No event is delivered for it.
    pub fn shutdown(&mut self) {
        if let Some(active) = self.active_turn.take() {
            tracing::debug!(turn_id = active.turn_id, "aborting in-flight turn");
            active.handle.abort();
        }
    }

    fn spawn_turn(&self, request: TurnRequest) -> Result<JoinHandle<()>, String> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|error| format!("Failed to spawn turn: {error}"))?;

        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        let turn_timeout = self.turn_timeout;
        let turn_id = request.turn_id;
        let query = AgentQuery::new(turn_id, request.message);

        Ok(runtime.spawn(async move {
            let result = ask_with_timeout(service, query, turn_timeout).await;
            match &result {
                Ok(reply) => tracing::info!(
                    turn_id,
                    tool_used = reply.tool_used.as_deref().unwrap_or(""),
                    "turn finished"
                ),
                Err(error) => tracing::warn!(
                    turn_id,
                    kind = error.kind().as_str(),
                    %error,
                    "turn failed"
                ),
            }

            let outcome = TurnOutcome::from_result(result);
            if events
                .send(RuntimeEvent::TurnFinished { turn_id, outcome })
                .is_err()
            {
                tracing::debug!(turn_id, "turn finished after the session went away");
            }
        }))
    }
}

impl Drop for RuntimeController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn ask_with_timeout(
    service: Arc<dyn AgentService>,
    query: AgentQuery,
    turn_timeout: Duration,
) -> Result<AgentReply, AgentError> {
    let mut call = AbortOnDrop(tokio::spawn(async move { service.ask(query).await }));

    match tokio::time::timeout(turn_timeout, &mut call.0).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) if join_error.is_panic() => {
            Err(AgentError::Internal("agent service panicked".to_string()))
        }
        Ok(Err(_)) => Err(AgentError::Internal("agent call was cancelled".to_string())),
        Err(_) => Err(AgentError::Timeout {
            after: turn_timeout,
        }),
    }
}

impl HostOps for RuntimeController {
    fn start_turn(&mut self, request: TurnRequest) -> Result<(), String> {
        if self.active_turn.is_some() {
            return Err(ERROR_TURN_ALREADY_ACTIVE.to_string());
        }

        let turn_id = request.turn_id;
        let handle = self.spawn_turn(request)?;
        tracing::info!(
            turn_id,
            service = %self.service.profile().service_id,
            "turn dispatched"
        );
        self.active_turn = Some(ActiveTurn { turn_id, handle });
        Ok(())
    }

    fn cancel_turn(&mut self, turn_id: TurnId) {
        if self.active_turn() == Some(turn_id) {
            self.shutdown();
        }
    }

    fn scroll_to_latest(&mut self) {
        self.requests.scroll_to_latest = true;
    }

    fn request_render(&mut self) {
        self.requests.render = true;
    }

    fn show_notice(&mut self, text: String) {
        self.requests.notices.push(text);
    }

    fn request_stop(&mut self) {
        self.requests.stop = true;
    }
}
