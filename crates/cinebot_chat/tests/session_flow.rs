mod support;

use agent_service::{AgentError, AgentReply};
use cinebot_chat::session::{
    Message, Mode, Session, TurnOutcome, BACKEND_UNREACHABLE_TEXT, DEFAULT_WELCOME,
};
use pretty_assertions::assert_eq;
use support::HostSpy;

fn submit(session: &mut Session, host: &mut HostSpy, text: &str) {
    session.update_draft(text);
    session.submit(host);
}

#[test]
fn submit_appends_user_message_clears_draft_and_dispatches() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    submit(&mut session, &mut host, "find inception");

    assert_eq!(
        session.transcript(),
        &[Message::bot(DEFAULT_WELCOME), Message::user("find inception")]
    );
    assert_eq!(session.draft(), "");
    assert!(session.is_busy());
    assert_eq!(session.mode(), &Mode::AwaitingReply { turn_id: 1 });
    assert_eq!(host.started_messages(), vec!["find inception".to_string()]);
    assert_eq!(host.started[0].turn_id, 1);
    assert_eq!(host.scroll_requests, 1);
}

#[test]
fn raw_draft_is_sent_and_recorded_untrimmed() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    submit(&mut session, &mut host, "  dreams  ");

    assert_eq!(session.transcript()[1], Message::user("  dreams  "));
    assert_eq!(host.started_messages(), vec!["  dreams  ".to_string()]);
}

#[test]
fn success_reply_appends_bot_message_with_tool() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    submit(&mut session, &mut host, "find inception");
    let outcome = TurnOutcome::from_result(Ok(AgentReply::with_tool(
        "Inception (2010), dir. Nolan",
        "search_movie",
    )));
    session.on_turn_finished(1, outcome, &mut host);

    assert_eq!(
        &session.transcript()[1..],
        &[
            Message::user("find inception"),
            Message::bot("Inception (2010), dir. Nolan")
                .with_tool(Some("search_movie".to_string())),
        ]
    );
    assert!(!session.is_busy());
    assert_eq!(host.scroll_requests, 2);
}

#[test]
fn failed_call_appends_fallback_without_tool() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    submit(&mut session, &mut host, "hello");
    let outcome =
        TurnOutcome::from_result(Err(AgentError::Transport("connection refused".to_string())));
    session.on_turn_finished(1, outcome, &mut host);

    assert_eq!(
        &session.transcript()[1..],
        &[Message::user("hello"), Message::bot(BACKEND_UNREACHABLE_TEXT)]
    );
    assert_eq!(session.transcript()[2].tool, None);
    assert!(!session.is_busy());
    assert_eq!(session.draft(), "");
}

#[test]
fn submit_while_busy_is_dropped() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    submit(&mut session, &mut host, "a");
    submit(&mut session, &mut host, "b");

    assert_eq!(
        &session.transcript()[1..],
        &[Message::user("a")]
    );
    assert_eq!(host.started_messages(), vec!["a".to_string()]);
    assert_eq!(session.draft(), "b");
}

#[test]
fn draft_edits_are_accepted_while_busy() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    submit(&mut session, &mut host, "a");
    session.update_draft("next question");

    assert!(session.is_busy());
    assert_eq!(session.draft(), "next question");
}

#[test]
fn empty_and_whitespace_submissions_are_no_ops() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    for draft in ["", "   ", "\t\n"] {
        submit(&mut session, &mut host, draft);
    }

    assert_eq!(session.transcript(), &[Message::bot(DEFAULT_WELCOME)]);
    assert!(host.started.is_empty());
    assert!(!session.is_busy());
    assert_eq!(host.scroll_requests, 0);
}

#[test]
fn refused_dispatch_resolves_turn_as_failure() {
    let mut session = Session::new();
    let mut host = HostSpy::refusing("Turn already active");

    submit(&mut session, &mut host, "hello");

    assert_eq!(
        &session.transcript()[1..],
        &[Message::user("hello"), Message::bot(BACKEND_UNREACHABLE_TEXT)]
    );
    assert!(!session.is_busy());
    assert_eq!(session.draft(), "");
}

#[test]
fn transcript_is_append_only_across_turns() {
    let mut session = Session::new();
    let mut host = HostSpy::default();
    let mut snapshots: Vec<Vec<Message>> = vec![session.transcript().to_vec()];

    let turns = [
        ("one", Ok(AgentReply::text("first"))),
        ("two", Err(AgentError::Decode("eof".to_string()))),
        ("three", Ok(AgentReply::default())),
    ];

    for (turn_id, (text, result)) in (1..).zip(turns) {
        submit(&mut session, &mut host, text);
        snapshots.push(session.transcript().to_vec());
        session.on_turn_finished(turn_id, TurnOutcome::from_result(result), &mut host);
        snapshots.push(session.transcript().to_vec());
    }

    for pair in snapshots.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        assert!(after.len() >= before.len());
        assert_eq!(&after[..before.len()], before.as_slice());
    }
    assert_eq!(session.transcript().len(), 7);
    assert_eq!(
        host.started.iter().map(|request| request.turn_id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn slash_commands_show_notices_and_leave_transcript_alone() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    submit(&mut session, &mut host, "/help");
    submit(&mut session, &mut host, "/nope extra");

    assert_eq!(session.transcript(), &[Message::bot(DEFAULT_WELCOME)]);
    assert_eq!(host.notices.len(), 2);
    assert!(host.notices[0].contains("/quit"));
    assert_eq!(host.notices[1], "Unknown command: /nope");
    assert_eq!(session.draft(), "");
    assert!(host.started.is_empty());
}

#[test]
fn quit_cancels_in_flight_turn_and_requests_stop() {
    let mut session = Session::new();
    let mut host = HostSpy::default();

    submit(&mut session, &mut host, "slow question");
    submit(&mut session, &mut host, "/quit");

    assert_eq!(host.cancelled, vec![1]);
    assert_eq!(host.stop_requests, 1);
    assert!(session.should_exit());

    submit(&mut session, &mut host, "after quit");
    assert_eq!(host.started_messages(), vec!["slow question".to_string()]);
}
