//! Node handlers: one per router destination.
//!
//! Each handler derives the next `ThreadState` and the turn's answer. All
//! collaborator failures inside a handler degrade to fixed fallbacks, so a
//! handler never aborts a turn; only the state store can do that, and it is
//! the engine's concern.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::support::{prompts, replies, ThreadState};
use crate::ports::{CompletionRequest, KnowledgeRetriever, LanguageModel};

/// The result of running one node handler.
#[derive(Debug, Clone)]
pub struct NodeOutcome {
    /// The state to persist for this turn.
    pub state: ThreadState,
    /// The answer to return to the user.
    pub answer: String,
}

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+")
        .expect("email pattern is valid")
});

/// Replies briefly and politely to conversational filler.
pub async fn small_talk<L>(state: ThreadState, message: &str, model: &L) -> NodeOutcome
where
    L: LanguageModel + ?Sized,
{
    let request = CompletionRequest::new(prompts::small_talk(message)).with_max_tokens(256);
    let answer = match model.complete(request).await {
        Ok(completion) => completion.text,
        Err(error) => {
            warn!(
                thread_id = %state.thread_id,
                error = %error,
                "small-talk synthesis failed, using canned reply"
            );
            replies::SMALL_TALK_FALLBACK.to_string()
        }
    };

    let state = state.with_exchange(message, answer.clone());
    NodeOutcome { state, answer }
}

/// Answers from the tenant's knowledge base.
///
/// Zero retrieved passages (including a degraded retrieval failure) yields
/// the fixed apology without touching the model. Otherwise the answer is
/// synthesized over the passages, a `<N> day(s)` pattern in it re-learns the
/// policy threshold, and a second call refreshes the rolling summary.
pub async fn knowledge_answer<L, K>(
    state: ThreadState,
    message: &str,
    model: &L,
    retriever: &K,
    top_k: usize,
) -> NodeOutcome
where
    L: LanguageModel + ?Sized,
    K: KnowledgeRetriever + ?Sized,
{
    let query = prompts::combined_query(state.context_summary.as_deref(), message);

    let passages = match retriever.retrieve(&query, &state.tenant_id, top_k).await {
        Ok(passages) => passages,
        Err(error) => {
            warn!(
                thread_id = %state.thread_id,
                tenant_id = %state.tenant_id,
                error = %error,
                "retrieval failed, degrading to empty passages"
            );
            Vec::new()
        }
    };

    if passages.is_empty() {
        debug!(
            thread_id = %state.thread_id,
            tenant_id = %state.tenant_id,
            "no passages retrieved"
        );
        let answer = replies::NO_KNOWLEDGE_MATCH.to_string();
        let state = state.with_exchange(message, answer.clone());
        return NodeOutcome { state, answer };
    }

    let context = passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let request = CompletionRequest::new(prompts::grounded_answer(&query, &context));
    let answer = match model.complete(request).await {
        Ok(completion) => completion.text,
        Err(error) => {
            warn!(
                thread_id = %state.thread_id,
                error = %error,
                "answer synthesis failed, using fallback"
            );
            replies::KNOWLEDGE_UNAVAILABLE.to_string()
        }
    };

    let mut state = state;
    if let Some(days) = crate::domain::support::policy::extract_policy_days(&answer) {
        debug!(thread_id = %state.thread_id, days, "learned policy threshold");
        state = state.with_policy_threshold(days);
    }

    let summary_request = CompletionRequest::new(prompts::answer_summary(&answer));
    match model.complete(summary_request).await {
        Ok(completion) => {
            state = state.with_context_summary(completion.text.trim().to_string());
        }
        Err(error) => {
            // Keep the previous summary; only follow-up disambiguation
            // degrades.
            warn!(
                thread_id = %state.thread_id,
                error = %error,
                "summary synthesis failed, keeping previous context summary"
            );
        }
    }

    let state = state.with_exchange(message, answer.clone());
    NodeOutcome { state, answer }
}

/// Opens the escalation funnel by asking for name and email.
pub fn ask_identity(state: ThreadState, message: &str) -> NodeOutcome {
    let answer = replies::ASK_IDENTITY.to_string();
    let state = state
        .awaiting_identity_now()
        .with_exchange(message, answer.clone());
    NodeOutcome { state, answer }
}

/// Parses name and email out of the identity message.
///
/// Without a valid email the funnel stays on this step and re-prompts. With
/// one, the name is whatever remains of the message once the email and stray
/// commas are removed, whitespace collapsed, defaulting to "Customer".
pub fn collect_identity(state: ThreadState, message: &str) -> NodeOutcome {
    let Some(found) = EMAIL.find(message) else {
        let answer = replies::IDENTITY_RETRY.to_string();
        let state = state.with_exchange(message, answer.clone());
        return NodeOutcome { state, answer };
    };

    let email = found.as_str().to_string();
    let name_part = message.replace(&email, "").replace(',', " ");
    let name = name_part.split_whitespace().collect::<Vec<_>>().join(" ");
    let name = if name.is_empty() {
        replies::DEFAULT_CUSTOMER_NAME.to_string()
    } else {
        name
    };

    let answer = replies::identity_thanks(&name);
    let state = state
        .with_identity(name, email)
        .with_exchange(message, answer.clone());
    NodeOutcome { state, answer }
}

/// Asks for the full issue description (identity already known).
pub fn ask_issue(state: ThreadState, message: &str) -> NodeOutcome {
    let answer = replies::ASK_ISSUE.to_string();
    let state = state
        .awaiting_issue_now()
        .with_exchange(message, answer.clone());
    NodeOutcome { state, answer }
}

/// Completes the escalation: summarizes the captured issue and marks the
/// thread escalated. The pending fields survive this turn's save so the
/// engine can hand the ticket off.
pub async fn escalate<L>(state: ThreadState, message: &str, model: &L) -> NodeOutcome
where
    L: LanguageModel + ?Sized,
{
    let issue = state
        .pending_issue_text
        .clone()
        .unwrap_or_else(|| message.to_string());

    let summary = match &state.pending_issue_summary {
        Some(existing) => existing.clone(),
        None => {
            let request = CompletionRequest::new(prompts::issue_summary(&issue));
            match model.complete(request).await {
                Ok(completion) => completion.text.trim().to_string(),
                Err(error) => {
                    warn!(
                        thread_id = %state.thread_id,
                        error = %error,
                        "issue summary synthesis failed, using raw issue text"
                    );
                    issue.clone()
                }
            }
        }
    };

    let answer = replies::TICKET_RAISED.to_string();
    let state = state
        .with_pending_issue(issue)
        .escalated_now(summary)
        .with_exchange(message, answer.clone());
    NodeOutcome { state, answer }
}

/// Reminds the user what the agent can help with.
pub fn out_of_scope(state: ThreadState, message: &str) -> NodeOutcome {
    let answer = replies::OUT_OF_SCOPE.to_string();
    let state = state
        .with_scope_failure()
        .with_exchange(message, answer.clone());
    NodeOutcome { state, answer }
}
