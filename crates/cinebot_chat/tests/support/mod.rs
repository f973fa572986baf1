#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use agent_service::TurnId;
use cinebot::{strip_ansi, Terminal};
use cinebot_chat::session::{HostOps, TurnRequest};

#[derive(Default)]
pub struct HostSpy {
    pub started: Vec<TurnRequest>,
    pub refuse_with: Option<String>,
    pub cancelled: Vec<TurnId>,
    pub scroll_requests: usize,
    pub render_requests: usize,
    pub notices: Vec<String>,
    pub stop_requests: usize,
}

impl HostSpy {
    pub fn refusing(error: &str) -> Self {
        Self {
            refuse_with: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn started_messages(&self) -> Vec<String> {
        self.started
            .iter()
            .map(|request| request.message.clone())
            .collect()
    }
}

impl HostOps for HostSpy {
    fn start_turn(&mut self, request: TurnRequest) -> Result<(), String> {
        if let Some(error) = &self.refuse_with {
            return Err(error.clone());
        }
        self.started.push(request);
        Ok(())
    }

    fn cancel_turn(&mut self, turn_id: TurnId) {
        self.cancelled.push(turn_id);
    }

    fn scroll_to_latest(&mut self) {
        self.scroll_requests += 1;
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }

    fn show_notice(&mut self, text: String) {
        self.notices.push(text);
    }

    fn request_stop(&mut self) {
        self.stop_requests += 1;
    }
}

#[derive(Default)]
pub struct TerminalTrace {
    pub writes: Vec<String>,
    pub flushes: usize,
}

impl TerminalTrace {
    pub fn output(&self) -> String {
        self.writes.concat()
    }

    /// Output with ANSI sequences removed.
    pub fn plain_output(&self) -> String {
        strip_ansi(&self.output())
    }
}

pub struct SharedTerminal {
    state: Arc<Mutex<TerminalTrace>>,
    columns: u16,
    interactive: bool,
}

impl SharedTerminal {
    pub fn new(columns: u16, interactive: bool) -> (Self, Arc<Mutex<TerminalTrace>>) {
        let state = Arc::new(Mutex::new(TerminalTrace::default()));
        (
            Self {
                state: Arc::clone(&state),
                columns,
                interactive,
            },
            state,
        )
    }
}

impl Terminal for SharedTerminal {
    fn write(&mut self, data: &str) -> std::io::Result<()> {
        lock_unpoisoned(&self.state).writes.push(data.to_string());
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        lock_unpoisoned(&self.state).flushes += 1;
        Ok(())
    }

    fn columns(&self) -> u16 {
        self.columns
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
