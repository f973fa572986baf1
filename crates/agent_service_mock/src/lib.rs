//! Deterministic mock implementation of the shared `agent_service` contract.
//!
//! The default service answers from a small built-in movie catalog, shaped like replies from
//! the real backend. Scripted services replay fixed steps and are meant for tests.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use agent_service::{AgentError, AgentQuery, AgentReply, AgentService, ServiceProfile};
use async_trait::async_trait;

/// Stable service identifier used for explicit startup selection.
pub const MOCK_SERVICE_ID: &str = "mock";

pub const TOOL_SEARCH: &str = "SEARCH";
pub const TOOL_RECOMMEND: &str = "RECOMMEND";
pub const TOOL_NONE: &str = "NONE";

pub const NOT_FOUND_REPLY: &str = "I'm sorry, I couldn't find any information on that.";

const CATALOG: &[&str] = &[
    "Inception: A thief enters dreams to steal secrets.",
    "The Matrix: A hacker discovers reality is a simulation.",
    "Interstellar: Explorers travel through wormholes.",
    "Ratatouille: A rat who can cook in Paris.",
    "Titanic: A romance disaster film about a sinking ship.",
];

const RECOMMEND_WORDS: &[&str] = &["recommend", "suggest", "suggestion", "recommendation"];

const STOP_WORDS: &[&str] = &[
    "the", "and", "who", "can", "about", "film", "movie", "movies", "with", "for", "what", "me",
];

const MAX_RESULTS: usize = 3;

/// One scripted response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockStep {
    Reply(AgentReply),
    Fail(AgentError),
    /// Never resolves; the caller's timeout has to end the turn.
    Hang,
    Delayed(Duration, AgentReply),
    Panic(String),
}

#[derive(Debug)]
enum Behaviour {
    Catalog,
    Script(Vec<MockStep>),
}

#[derive(Debug, Default)]
struct MockState {
    next_step: usize,
    queries: Vec<AgentQuery>,
}

/// Deterministic mock service used by `cinebot_chat` tests and offline runs.
#[derive(Debug)]
pub struct MockAgentService {
    behaviour: Behaviour,
    state: Mutex<MockState>,
}

impl MockAgentService {
    /// Creates a service replaying `steps` in order; the last step repeats once exhausted.
    #[must_use]
    pub fn scripted(steps: Vec<MockStep>) -> Self {
        Self {
            behaviour: Behaviour::Script(steps),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Creates a service that always replies with `reply`.
    #[must_use]
    pub fn replying(reply: AgentReply) -> Self {
        Self::scripted(vec![MockStep::Reply(reply)])
    }

    /// Creates a service that always fails with `error`.
    #[must_use]
    pub fn failing(error: AgentError) -> Self {
        Self::scripted(vec![MockStep::Fail(error)])
    }

    /// Queries received so far, in arrival order.
    pub fn queries(&self) -> Vec<AgentQuery> {
        lock_unpoisoned(&self.state).queries.clone()
    }

    fn next_step(&self, query: &AgentQuery) -> Option<MockStep> {
        let mut state = lock_unpoisoned(&self.state);
        state.queries.push(query.clone());

        let Behaviour::Script(steps) = &self.behaviour else {
            return None;
        };
        let index = state.next_step.min(steps.len().saturating_sub(1));
        state.next_step = state.next_step.saturating_add(1);
        Some(
            steps.get(index).cloned().unwrap_or_else(|| {
                MockStep::Fail(AgentError::Internal("empty mock script".to_string()))
            }),
        )
    }
}

impl Default for MockAgentService {
    fn default() -> Self {
        Self {
            behaviour: Behaviour::Catalog,
            state: Mutex::new(MockState::default()),
        }
    }
}

#[async_trait]
impl AgentService for MockAgentService {
    fn profile(&self) -> ServiceProfile {
        ServiceProfile {
            service_id: MOCK_SERVICE_ID.to_string(),
            endpoint: None,
        }
    }

    async fn ask(&self, query: AgentQuery) -> Result<AgentReply, AgentError> {
        let Some(step) = self.next_step(&query) else {
            return Ok(catalog_reply(&query.message));
        };

        match step {
            MockStep::Reply(reply) => Ok(reply),
            MockStep::Fail(error) => Err(error),
            MockStep::Hang => std::future::pending().await,
            MockStep::Delayed(delay, reply) => {
                tokio::time::sleep(delay).await;
                Ok(reply)
            }
            MockStep::Panic(message) => panic!("{message}"),
        }
    }
}

/// Keyword search over the built-in catalog.
pub fn catalog_reply(message: &str) -> AgentReply {
    let words = keywords(message);
    let hits: Vec<&str> = CATALOG
        .iter()
        .copied()
        .filter(|entry| {
            let entry_words = keywords(entry);
            words.iter().any(|word| {
                entry_words
                    .iter()
                    .any(|candidate| candidate.starts_with(word.as_str()))
            })
        })
        .take(MAX_RESULTS)
        .collect();

    if !hits.is_empty() {
        return AgentReply::with_tool(found_these(&hits), TOOL_SEARCH);
    }

    let wants_recommendation = message
        .to_lowercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .any(|word| RECOMMEND_WORDS.contains(&word));
    if wants_recommendation {
        let picks: Vec<&str> = CATALOG.iter().copied().take(MAX_RESULTS).collect();
        return AgentReply::with_tool(found_these(&picks), TOOL_RECOMMEND);
    }

    AgentReply::with_tool(NOT_FOUND_REPLY, TOOL_NONE)
}

fn found_these(entries: &[&str]) -> String {
    let list: Vec<String> = entries.iter().map(|entry| format!("- {entry}")).collect();
    format!("Found these movies:\n\n{}", list.join("\n"))
}

fn keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| word.chars().count() >= 3 && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
