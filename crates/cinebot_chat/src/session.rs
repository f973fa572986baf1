use agent_service::{AgentError, AgentReply, TurnId};

use crate::commands::{parse_slash_command, SlashCommand};

pub const DEFAULT_WELCOME: &str =
    "Hello! I am your AI Movie Assistant. 🎬\nAsk me for recommendations, specific details, or search for titles!";
pub const NO_RESPONSE_TEXT: &str = "Error: No response.";
pub const BACKEND_UNREACHABLE_TEXT: &str = "Server Error: Is the backend running?";
pub const TIMEOUT_TEXT: &str = "Server Error: The agent did not respond in time.";

const HELP_TEXT: &str = "Commands: /help, /quit. Anything else is sent to the movie assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    /// Tool the agent reported using. Only ever set on bot messages.
    pub tool: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            tool: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            tool: None,
        }
    }

    /// Attaches a tool annotation; blank tool names are dropped.
    pub fn with_tool(mut self, tool: Option<String>) -> Self {
        self.tool = tool.filter(|value| !value.is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    AwaitingReply { turn_id: TurnId },
    Exiting,
}

/// Resolution of one turn, ready to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Replied(Message),
    Failed(Message),
}

impl TurnOutcome {
    pub fn from_result(result: Result<AgentReply, AgentError>) -> Self {
        match result {
            Ok(reply) => {
                let text = reply
                    .response
                    .filter(|response| !response.is_empty())
                    .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());
                Self::Replied(Message::bot(text).with_tool(reply.tool_used))
            }
            Err(error) if error.is_timeout() => Self::Failed(Message::bot(TIMEOUT_TEXT)),
            Err(_) => Self::Failed(Message::bot(BACKEND_UNREACHABLE_TEXT)),
        }
    }

    /// Host refused to dispatch the turn at all.
    pub fn dispatch_failed() -> Self {
        Self::Failed(Message::bot(BACKEND_UNREACHABLE_TEXT))
    }

    pub fn message(&self) -> &Message {
        match self {
            Self::Replied(message) | Self::Failed(message) => message,
        }
    }

    pub fn into_message(self) -> Message {
        match self {
            Self::Replied(message) | Self::Failed(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What the host needs to dispatch one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub turn_id: TurnId,
    /// Raw draft text exactly as submitted.
    pub message: String,
}

pub trait HostOps {
    fn start_turn(&mut self, request: TurnRequest) -> Result<(), String>;
    fn cancel_turn(&mut self, turn_id: TurnId);
    fn scroll_to_latest(&mut self);
    fn request_render(&mut self);
    fn show_notice(&mut self, text: String);
    fn request_stop(&mut self);
}

/// Chat session state: transcript, draft and busy state.
///
/// The transcript only ever grows. At most one turn is awaited at a time, and while one is
/// the session refuses new submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    transcript: Vec<Message>,
    draft: String,
    mode: Mode,
    next_turn_id: TurnId,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_welcome(DEFAULT_WELCOME)
    }

    /// Starts with a single bot greeting; a blank greeting falls back to the default one.
    pub fn with_welcome(welcome: impl Into<String>) -> Self {
        let welcome = welcome.into();
        let welcome = if welcome.trim().is_empty() {
            DEFAULT_WELCOME.to_string()
        } else {
            welcome
        };

        Self {
            transcript: vec![Message::bot(welcome)],
            draft: String::new(),
            mode: Mode::Idle,
            next_turn_id: 1,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.mode, Mode::AwaitingReply { .. })
    }

    pub fn should_exit(&self) -> bool {
        self.mode == Mode::Exiting
    }

    /// Turn currently awaited, if any.
    pub fn awaiting_turn(&self) -> Option<TurnId> {
        match self.mode {
            Mode::AwaitingReply { turn_id } => Some(turn_id),
            _ => None,
        }
    }

    /// Replaces the draft. Allowed while busy.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn submit(&mut self, host: &mut dyn HostOps) {
        if self.mode == Mode::Exiting {
            return;
        }

        if let Some(command) = parse_slash_command(&self.draft) {
            self.draft.clear();
            self.run_command(command, host);
            host.request_render();
            return;
        }

        if self.draft.trim().is_empty() || self.is_busy() {
            return;
        }

        let text = std::mem::take(&mut self.draft);
        self.append(Message::user(text.clone()), host);

        let turn_id = self.next_turn_id;
        self.next_turn_id += 1;
        self.mode = Mode::AwaitingReply { turn_id };
        host.request_render();

        let request = TurnRequest {
            turn_id,
            message: text,
        };
        if let Err(error) = host.start_turn(request) {
            tracing::warn!(turn_id, %error, "turn could not be dispatched");
            self.mode = Mode::Idle;
            self.append(TurnOutcome::dispatch_failed().into_message(), host);
            host.request_render();
        }
    }

    /// Applies a finished turn. Outcomes for any turn other than the awaited one are dropped.
    pub fn on_turn_finished(
        &mut self,
        turn_id: TurnId,
        outcome: TurnOutcome,
        host: &mut dyn HostOps,
    ) {
        if self.awaiting_turn() != Some(turn_id) {
            tracing::debug!(turn_id, "ignoring outcome for a turn that is not awaited");
            return;
        }

        self.mode = Mode::Idle;
        self.append(outcome.into_message(), host);
        host.request_render();
    }

    pub fn on_quit(&mut self, host: &mut dyn HostOps) {
        if let Some(turn_id) = self.awaiting_turn() {
            host.cancel_turn(turn_id);
        }
        self.mode = Mode::Exiting;
        host.request_stop();
        host.request_render();
    }

    fn run_command(&mut self, command: SlashCommand, host: &mut dyn HostOps) {
        match command {
            SlashCommand::Help => host.show_notice(HELP_TEXT.to_string()),
            SlashCommand::Quit => self.on_quit(host),
            SlashCommand::Unknown(command) => {
                host.show_notice(format!("Unknown command: {command}"));
            }
        }
    }

    fn append(&mut self, message: Message, host: &mut dyn HostOps) {
        self.transcript.push(message);
        host.scroll_to_latest();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use agent_service::{AgentError, AgentReply};

    use super::{
        Message, Sender, Session, TurnOutcome, BACKEND_UNREACHABLE_TEXT, DEFAULT_WELCOME,
        NO_RESPONSE_TEXT, TIMEOUT_TEXT,
    };

    #[test]
    fn new_session_greets_once() {
        let session = Session::new();
        assert_eq!(session.transcript(), &[Message::bot(DEFAULT_WELCOME)]);
        assert_eq!(session.draft(), "");
        assert!(!session.is_busy());
    }

    #[test]
    fn blank_welcome_falls_back_to_default() {
        let session = Session::with_welcome("  ");
        assert_eq!(session.transcript()[0].text, DEFAULT_WELCOME);
    }

    #[test]
    fn reply_keeps_text_and_tool() {
        let outcome = TurnOutcome::from_result(Ok(AgentReply::with_tool("Inception", "SEARCH")));
        assert_eq!(
            outcome,
            TurnOutcome::Replied(Message::bot("Inception").with_tool(Some("SEARCH".to_string())))
        );
    }

    #[test]
    fn missing_or_empty_response_uses_placeholder() {
        let missing = TurnOutcome::from_result(Ok(AgentReply::default()));
        assert_eq!(missing.message().text, NO_RESPONSE_TEXT);
        assert!(!missing.is_failure());

        let empty = TurnOutcome::from_result(Ok(AgentReply {
            response: Some(String::new()),
            tool_used: Some(String::new()),
        }));
        assert_eq!(empty.message().text, NO_RESPONSE_TEXT);
        assert_eq!(empty.message().tool, None);
    }

    #[test]
    fn errors_collapse_to_fallback_text() {
        let transport = TurnOutcome::from_result(Err(AgentError::Transport("refused".into())));
        assert_eq!(
            transport,
            TurnOutcome::Failed(Message::bot(BACKEND_UNREACHABLE_TEXT))
        );

        let status = TurnOutcome::from_result(Err(AgentError::Status {
            status: 500,
            message: "boom".into(),
        }));
        assert_eq!(status.message().text, BACKEND_UNREACHABLE_TEXT);

        let timeout = TurnOutcome::from_result(Err(AgentError::Timeout {
            after: Duration::from_secs(30),
        }));
        assert_eq!(timeout.message().text, TIMEOUT_TEXT);
        assert_eq!(timeout.message().sender, Sender::Bot);
        assert!(timeout.is_failure());
    }
}
