//! Mock language model for testing.
//!
//! Scripted responses are consumed in order; errors can be injected to
//! exercise the degradation paths, and every request is recorded for
//! verification.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::ports::{Completion, CompletionRequest, LanguageModel, LanguageModelError};

/// Scripted mock implementation of the [`LanguageModel`] port.
#[derive(Debug, Clone, Default)]
pub struct MockLanguageModel {
    responses: Arc<Mutex<VecDeque<Result<String, LanguageModelError>>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
}

impl MockLanguageModel {
    /// Creates a mock with no scripted responses.
    ///
    /// An empty script answers every request with `"Mock reply"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(text.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: LanguageModelError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets a simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of completed calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded requests, in call order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the recorded call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn next_response(&self) -> Result<String, LanguageModelError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock reply".to_string()))
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<Completion, LanguageModelError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_response()
            .map(|text| Completion::new(text, "mock-model"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let model = MockLanguageModel::new()
            .with_response("first")
            .with_response("second");

        let a = model.complete(CompletionRequest::new("a")).await.unwrap();
        let b = model.complete(CompletionRequest::new("b")).await.unwrap();

        assert_eq!(a.text, "first");
        assert_eq!(b.text, "second");
    }

    #[tokio::test]
    async fn empty_script_yields_default_reply() {
        let model = MockLanguageModel::new();
        let completion = model.complete(CompletionRequest::new("x")).await.unwrap();
        assert_eq!(completion.text, "Mock reply");
    }

    #[tokio::test]
    async fn errors_are_injected() {
        let model =
            MockLanguageModel::new().with_error(LanguageModelError::AuthenticationFailed);
        let result = model.complete(CompletionRequest::new("x")).await;
        assert!(matches!(result, Err(LanguageModelError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let model = MockLanguageModel::new();
        model
            .complete(CompletionRequest::new("classify me"))
            .await
            .unwrap();

        assert_eq!(model.call_count(), 1);
        assert_eq!(model.calls()[0].prompt, "classify me");

        model.clear_calls();
        assert_eq!(model.call_count(), 0);
    }
}
