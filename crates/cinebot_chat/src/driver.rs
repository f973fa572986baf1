use std::io;
use std::time::Duration;

use cinebot::Terminal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::runtime::{RuntimeController, RuntimeEvent};
use crate::session::Session;
use crate::view::ChatView;

pub const LOADER_TICK: Duration = Duration::from_millis(80);

/// Event loop tying input lines, turn results and the view to one [`Session`].
pub struct ChatDriver<T: Terminal> {
    session: Session,
    runtime: RuntimeController,
    events: mpsc::UnboundedReceiver<RuntimeEvent>,
    view: ChatView<T>,
}

impl<T: Terminal> ChatDriver<T> {
    pub fn new(
        session: Session,
        runtime: RuntimeController,
        events: mpsc::UnboundedReceiver<RuntimeEvent>,
        view: ChatView<T>,
    ) -> Self {
        Self {
            session,
            runtime,
            events,
            view,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ChatView<T> {
        &self.view
    }

    /// Runs until `/quit`, or until input ends and the in-flight turn (if any) has resolved.
    ///
    /// Every input line is one submission. Lines entered while a turn is in flight still reach
    /// the session, which drops them; nothing is queued for later.
    pub async fn run<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.view.start(&self.session)?;

        let mut lines = input.lines();
        let mut input_open = true;
        let mut ticker = tokio::time::interval(LOADER_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            if self.session.should_exit() || (!input_open && !self.session.is_busy()) {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => match line? {
                    Some(line) => self.handle_line(line)?,
                    None => {
                        tracing::debug!(busy = self.session.is_busy(), "input closed");
                        input_open = false;
                    }
                },
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event)?,
                    None => break,
                },
                _ = ticker.tick(), if self.session.is_busy() => self.view.tick_loader()?,
            }
        }

        self.runtime.shutdown();
        self.view.finish()
    }

    fn handle_line(&mut self, line: String) -> io::Result<()> {
        self.view.erase_echoed_input()?;
        self.session.update_draft(line);
        self.session.submit(&mut self.runtime);
        self.apply_view_requests()
    }

    fn handle_event(&mut self, event: RuntimeEvent) -> io::Result<()> {
        match event {
            RuntimeEvent::TurnFinished { turn_id, outcome } => {
                self.session
                    .on_turn_finished(turn_id, outcome, &mut self.runtime);
                self.runtime.finish_turn(turn_id);
            }
        }
        self.apply_view_requests()
    }

    fn apply_view_requests(&mut self) -> io::Result<()> {
        let requests = self.runtime.take_view_requests();
        for notice in &requests.notices {
            self.view.notice(notice)?;
        }
        if requests.stop {
            tracing::debug!("stop requested");
        }
        self.view.sync(&self.session)
    }
}
