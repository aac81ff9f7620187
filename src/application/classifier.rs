//! Intent classification for a single turn.
//!
//! Evaluation order, each step short-circuiting:
//!
//! 1. A thread mid issue-capture treats the whole message as the issue text
//!    and forces `escalation_request` (skipped once escalated, so an
//!    escalated thread can never re-arm the funnel).
//! 2. The deterministic greeting pre-check, when enabled, forces `greeting`
//!    without touching the model.
//! 3. Otherwise the probabilistic classifier runs; any failure (transport,
//!    timeout, malformed label) degrades to `faq` and is logged, never
//!    surfaced.

use std::sync::Arc;

use tracing::warn;

use crate::domain::support::{is_greeting, prompts, Intent, ThreadState};
use crate::ports::{CompletionRequest, LanguageModel};

/// Classification result for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTurn {
    /// The label the router will act on.
    pub intent: Intent,
    /// Issue text captured this turn, when the thread was awaiting it.
    pub captured_issue: Option<String>,
}

impl ClassifiedTurn {
    fn labelled(intent: Intent) -> Self {
        Self {
            intent,
            captured_issue: None,
        }
    }
}

/// Turn classifier over a language-model collaborator.
pub struct IntentClassifier<L> {
    model: Arc<L>,
    greeting_precheck: bool,
}

impl<L: LanguageModel> IntentClassifier<L> {
    /// Creates a classifier with the greeting pre-check enabled.
    pub fn new(model: Arc<L>) -> Self {
        Self {
            model,
            greeting_precheck: true,
        }
    }

    /// Enables or disables the deterministic greeting pre-check.
    pub fn with_greeting_precheck(mut self, enabled: bool) -> Self {
        self.greeting_precheck = enabled;
        self
    }

    /// Classifies the current message against the thread's state.
    pub async fn classify(&self, state: &ThreadState, message: &str) -> ClassifiedTurn {
        // Terminal capture of the issue description. Not applicable once
        // escalated: those threads are ordinary conversation from here on.
        if !state.escalated && state.awaiting_issue_description {
            return ClassifiedTurn {
                intent: Intent::EscalationRequest,
                captured_issue: Some(message.to_string()),
            };
        }

        if self.greeting_precheck && is_greeting(message) {
            return ClassifiedTurn::labelled(Intent::Greeting);
        }

        let request = CompletionRequest::new(prompts::classification(message))
            .with_max_tokens(32)
            .with_temperature(0.0);

        let intent = match self.model.complete(request).await {
            Ok(completion) => match prompts::parse_intent_response(&completion.text) {
                Some(intent) => intent,
                None => {
                    warn!(
                        thread_id = %state.thread_id,
                        raw = %completion.text,
                        "intent label parse failed, defaulting to faq"
                    );
                    Intent::Faq
                }
            },
            Err(error) => {
                warn!(
                    thread_id = %state.thread_id,
                    error = %error,
                    "intent classification failed, defaulting to faq"
                );
                Intent::Faq
            }
        };

        ClassifiedTurn::labelled(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockLanguageModel;
    use crate::domain::foundation::{TenantId, ThreadId};
    use crate::ports::LanguageModelError;

    fn fresh() -> ThreadState {
        ThreadState::new(ThreadId::new(), TenantId::new("acme").unwrap())
    }

    mod issue_capture {
        use super::*;

        #[tokio::test]
        async fn awaiting_issue_captures_whole_message() {
            let model = Arc::new(MockLanguageModel::new());
            let classifier = IntentClassifier::new(Arc::clone(&model));
            let state = fresh().awaiting_issue_now();

            let result = classifier
                .classify(&state, "my refund for order 123 was denied")
                .await;

            assert_eq!(result.intent, Intent::EscalationRequest);
            assert_eq!(
                result.captured_issue.as_deref(),
                Some("my refund for order 123 was denied")
            );
            assert_eq!(model.call_count(), 0, "capture must not call the model");
        }

        #[tokio::test]
        async fn capture_is_disabled_once_escalated() {
            let model = Arc::new(
                MockLanguageModel::new().with_response("{\"intent\": \"small_talk\"}"),
            );
            let classifier = IntentClassifier::new(Arc::clone(&model));
            let mut state = fresh().escalated_now("summary");
            // A stale flag must not re-arm the funnel.
            state.awaiting_issue_description = true;

            let result = classifier.classify(&state, "thanks").await;

            assert_eq!(result.intent, Intent::SmallTalk);
            assert!(result.captured_issue.is_none());
        }
    }

    mod greeting_precheck {
        use super::*;

        #[tokio::test]
        async fn greeting_bypasses_the_model() {
            let model = Arc::new(MockLanguageModel::new());
            let classifier = IntentClassifier::new(Arc::clone(&model));

            let result = classifier.classify(&fresh(), "hey there").await;

            assert_eq!(result.intent, Intent::Greeting);
            assert_eq!(model.call_count(), 0);
        }

        #[tokio::test]
        async fn precheck_can_be_disabled() {
            let model =
                Arc::new(MockLanguageModel::new().with_response("{\"intent\": \"faq\"}"));
            let classifier =
                IntentClassifier::new(Arc::clone(&model)).with_greeting_precheck(false);

            let result = classifier.classify(&fresh(), "hey there").await;

            assert_eq!(result.intent, Intent::Faq);
            assert_eq!(model.call_count(), 1);
        }
    }

    mod probabilistic {
        use super::*;

        #[tokio::test]
        async fn parses_model_label() {
            let model = Arc::new(
                MockLanguageModel::new().with_response("{\"intent\": \"escalation_request\"}"),
            );
            let classifier = IntentClassifier::new(Arc::clone(&model));

            let result = classifier.classify(&fresh(), "connect me to a human").await;

            assert_eq!(result.intent, Intent::EscalationRequest);
            let calls = model.calls();
            assert_eq!(calls.len(), 1);
            assert!(calls[0].prompt.contains("connect me to a human"));
        }

        #[tokio::test]
        async fn malformed_label_defaults_to_faq() {
            let model =
                Arc::new(MockLanguageModel::new().with_response("definitely chit-chat"));
            let classifier = IntentClassifier::new(Arc::clone(&model));

            let result = classifier.classify(&fresh(), "what is the return window").await;

            assert_eq!(result.intent, Intent::Faq);
        }

        #[tokio::test]
        async fn model_error_defaults_to_faq() {
            let model = Arc::new(
                MockLanguageModel::new()
                    .with_error(LanguageModelError::Timeout { timeout_secs: 5 }),
            );
            let classifier = IntentClassifier::new(Arc::clone(&model));

            let result = classifier.classify(&fresh(), "what is the return window").await;

            assert_eq!(result.intent, Intent::Faq);
        }
    }
}
