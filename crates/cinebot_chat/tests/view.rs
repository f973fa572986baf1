mod support;

use agent_service::AgentReply;
use cinebot::{Component, Style};
use cinebot_chat::session::{Message, Session, TurnOutcome};
use cinebot_chat::view::{block, ChatView};
use pretty_assertions::assert_eq;
use support::{lock_unpoisoned, HostSpy, SharedTerminal};

#[test]
fn multiline_message_renders_one_row_per_line() {
    let rows = block(&Message::bot("line1\nline2"), Style::plain()).render(80);
    assert_eq!(rows, vec!["cinebot: line1", "  line2"]);
}

#[test]
fn bot_tool_is_rendered_under_message() {
    let message = Message::bot("Found it").with_tool(Some("search_movie".to_string()));
    let rows = block(&message, Style::plain()).render(80);
    assert_eq!(rows, vec!["cinebot: Found it", "  Used Tool: search_movie"]);
}

#[test]
fn sync_writes_only_new_entries() {
    let (terminal, trace) = SharedTerminal::new(80, false);
    let mut view = ChatView::new(terminal, Style::plain()).with_header("CineBot");
    let mut session = Session::with_welcome("Hi there");
    let mut host = HostSpy::default();

    view.start(&session).expect("start");
    view.sync(&session).expect("idempotent sync");

    session.update_draft("titanic");
    session.submit(&mut host);
    view.sync(&session).expect("sync user");
    session.on_turn_finished(
        1,
        TurnOutcome::from_result(Ok(AgentReply::text("A ship sinks."))),
        &mut host,
    );
    view.sync(&session).expect("sync reply");

    assert_eq!(
        lock_unpoisoned(&trace).plain_output(),
        "CineBot\n\ncinebot: Hi there\n\nyou: titanic\n\ncinebot: A ship sinks.\n"
    );
}

#[test]
fn loader_is_drawn_while_busy_and_ticks_in_place() {
    let (terminal, trace) = SharedTerminal::new(80, true);
    let mut view = ChatView::new(terminal, Style::plain());
    let mut session = Session::with_welcome("Hi");
    let mut host = HostSpy::default();

    view.start(&session).expect("start");
    session.update_draft("question");
    session.submit(&mut host);
    view.erase_echoed_input().expect("erase");
    view.sync(&session).expect("sync");
    view.tick_loader().expect("tick");

    let output = lock_unpoisoned(&trace).output();
    assert!(output.starts_with("cinebot: Hi\n> "));
    assert!(output.contains("\x1b[1A\x1b[2K\r"));
    assert!(output.contains("⠋ Agent is typing..."));
    assert!(output.ends_with("\r\x1b[2K⠙ Agent is typing..."));
}

#[test]
fn input_typed_over_loader_is_erased_and_loader_redrawn() {
    let (terminal, trace) = SharedTerminal::new(80, true);
    let mut view = ChatView::new(terminal, Style::plain());
    let mut session = Session::with_welcome("Hi");
    let mut host = HostSpy::default();

    view.start(&session).expect("start");
    session.update_draft("first");
    session.submit(&mut host);
    view.erase_echoed_input().expect("erase prompt echo");
    view.sync(&session).expect("sync busy");
    let before = lock_unpoisoned(&trace).output().len();

    session.update_draft("second");
    session.submit(&mut host);
    view.erase_echoed_input().expect("erase loader echo");
    view.sync(&session).expect("sync still busy");

    let output = lock_unpoisoned(&trace).output();
    assert_eq!(&output[before..], "\x1b[1A\x1b[2K\r⠋ Agent is typing...");
    assert_eq!(host.started.len(), 1);
}

#[test]
fn notices_are_not_part_of_the_transcript() {
    let (terminal, trace) = SharedTerminal::new(80, false);
    let mut view = ChatView::new(terminal, Style::plain());
    let session = Session::with_welcome("Hi");

    view.start(&session).expect("start");
    view.notice("Unknown command: /x").expect("notice");
    view.sync(&session).expect("sync");

    assert_eq!(
        lock_unpoisoned(&trace).plain_output(),
        "cinebot: Hi\nUnknown command: /x\n"
    );
    assert_eq!(session.transcript().len(), 1);
}
