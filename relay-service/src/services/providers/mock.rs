//! Mock provider implementation for testing.

use super::{GenerationParams, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

enum MockBehavior {
    Reply(String),
    Fail,
}

/// Mock text provider with a canned outcome and a call counter.
pub struct MockTextProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockTextProvider {
    /// Answer every prompt with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Reply(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every prompt with an API error.
    pub fn failing() -> Self {
        Self {
            behavior: MockBehavior::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(text.clone()),
            MockBehavior::Fail => Err(ProviderError::ApiError(
                "Mock provider configured to fail".to_string(),
            )),
        }
    }
}
