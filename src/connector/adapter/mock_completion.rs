use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::DomainError;

const SAMPLE_RECIPE: &str = "\
# Mock Fried Rice

A canned recipe served without any network round trip.

## Ingredients
- 2 cups cooked rice
- 1 egg
- whatever the prompt asked for

## Steps
1. Heat a pan.
2. Fry everything.
3. Serve.
";

/// A [`CompletionClient`] that answers from canned data.
///
/// Used by the `--mock` CLI flag for offline runs, and by tests that need to
/// observe how callers drive the client: it records every prompt it receives
/// and counts invocations.
pub struct MockCompletionClient {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockCompletionClient {
    /// A client that always answers with a fixed sample recipe.
    pub fn new() -> Self {
        Self::with_reply(SAMPLE_RECIPE)
    }

    /// A client that always answers with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// A client whose every call fails with a completion error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// How many times `complete` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent prompt passed to `complete`, if any.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_prompt.lock() {
            *guard = Some(prompt.to_string());
        }

        debug!("MockCompletionClient: answering from canned data");

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(DomainError::completion(message.clone())),
        }
    }
}
