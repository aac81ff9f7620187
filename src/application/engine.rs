//! The per-turn orchestration engine.
//!
//! One engine is constructed at process start with its collaborators
//! injected and shared by reference with every request handler. A turn runs
//! under its thread's lock: load state, classify, route, run the node
//! handler, persist, then hand off a ticket when this turn escalated.
//!
//! # Failure semantics
//!
//! Classifier, retrieval, and synthesis failures degrade inside the
//! classifier and node handlers and never abort a turn. A state store
//! failure is fatal: no response is fabricated. A ticket handoff failure
//! surfaces to the caller, but only after the escalated state has been
//! committed, so a later turn can never create a second ticket.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::foundation::{TenantId, ThreadId, TicketId};
use crate::domain::support::{policy, route, DialogueNode, ThreadState};
use crate::ports::{
    KnowledgeRetriever, LanguageModel, NewTicket, StateStore, StateStoreError, TicketError,
    TicketGateway,
};

use super::classifier::IntentClassifier;
use super::locks::ThreadLocks;
use super::nodes::{self, NodeOutcome};

/// Engine tuning knobs, sourced from configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether the deterministic greeting pre-check is enabled.
    pub greeting_precheck: bool,
    /// Passages requested per knowledge lookup.
    pub retrieval_top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            greeting_precheck: true,
            retrieval_top_k: 3,
        }
    }
}

/// One user turn to process.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// Existing thread, or `None` to start a new one.
    pub thread_id: Option<ThreadId>,
    /// Tenant scope for retrieval and ticketing.
    pub tenant_id: TenantId,
    /// The user's message.
    pub message: String,
}

/// The result of a processed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The thread the turn belongs to (generated when the request had none).
    pub thread_id: ThreadId,
    /// The answer to show the user.
    pub answer: String,
    /// Whether the thread is (now) escalated.
    pub escalated: bool,
    /// Ticket created by this turn, if it was the escalating one.
    pub ticket_id: Option<TicketId>,
}

/// Errors fatal to a turn.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// The message was empty or whitespace.
    #[error("message content cannot be empty")]
    EmptyMessage,

    /// The state store failed; no safe default state exists.
    #[error("state store error: {0}")]
    StateStore(#[from] StateStoreError),

    /// Ticket creation failed after the escalated state was committed.
    #[error("ticket handoff failed: {0}")]
    TicketHandoff(#[from] TicketError),
}

/// Object-safe surface of the engine, for transport-layer state.
#[async_trait]
pub trait TurnProcessor: Send + Sync {
    /// Processes one turn.
    async fn process_turn(&self, request: TurnRequest) -> Result<TurnOutcome, TurnError>;
}

/// The turn engine over injected collaborators.
pub struct TurnEngine<S, L, K, T> {
    store: Arc<S>,
    model: Arc<L>,
    retriever: Arc<K>,
    tickets: Arc<T>,
    classifier: IntentClassifier<L>,
    locks: ThreadLocks,
    retrieval_top_k: usize,
}

impl<S, L, K, T> TurnEngine<S, L, K, T>
where
    S: StateStore,
    L: LanguageModel,
    K: KnowledgeRetriever,
    T: TicketGateway,
{
    /// Creates an engine with the given collaborators and tuning.
    pub fn new(
        store: Arc<S>,
        model: Arc<L>,
        retriever: Arc<K>,
        tickets: Arc<T>,
        config: EngineConfig,
    ) -> Self {
        let classifier = IntentClassifier::new(Arc::clone(&model))
            .with_greeting_precheck(config.greeting_precheck);
        Self {
            store,
            model,
            retriever,
            tickets,
            classifier,
            locks: ThreadLocks::new(),
            retrieval_top_k: config.retrieval_top_k,
        }
    }

    async fn run_turn(&self, request: TurnRequest) -> Result<TurnOutcome, TurnError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(TurnError::EmptyMessage);
        }

        let thread_id = request.thread_id.unwrap_or_default();
        let guard = self.locks.acquire(thread_id).await;

        let result = self
            .locked_turn(thread_id, &request.tenant_id, message)
            .await;

        drop(guard);
        self.locks.prune().await;
        result
    }

    /// The turn body; the caller holds the thread's lock.
    async fn locked_turn(
        &self,
        thread_id: ThreadId,
        tenant_id: &TenantId,
        message: &str,
    ) -> Result<TurnOutcome, TurnError> {
        let mut state = match self.store.load(thread_id).await? {
            Some(state) => state,
            None => ThreadState::new(thread_id, tenant_id.clone()),
        };

        // The escalating turn kept its pending fields alive for the handoff;
        // the first load after it drops them.
        if state.escalated
            && (state.pending_issue_text.is_some() || state.pending_issue_summary.is_some())
        {
            state = state.with_pending_cleared();
        }

        let escalated_before = state.escalated;

        let classified = self.classifier.classify(&state, message).await;
        if let Some(issue) = classified.captured_issue {
            state = state.with_pending_issue(issue);
        }

        let breached = policy::is_breach(&state, message);
        let node = route(&state, classified.intent, breached);
        debug!(
            thread_id = %thread_id,
            intent = ?classified.intent,
            breached,
            node = ?node,
            "routed turn"
        );

        let NodeOutcome { state, answer } = self.run_node(node, state, message).await;

        self.store.save(&state).await?;

        let ticket_id = if state.escalated && !escalated_before {
            self.hand_off_ticket(&state).await?
        } else {
            None
        };

        Ok(TurnOutcome {
            thread_id,
            answer,
            escalated: state.escalated,
            ticket_id,
        })
    }

    async fn run_node(
        &self,
        node: DialogueNode,
        state: ThreadState,
        message: &str,
    ) -> NodeOutcome {
        match node {
            DialogueNode::SmallTalk => {
                nodes::small_talk(state, message, self.model.as_ref()).await
            }
            DialogueNode::KnowledgeAnswer => {
                nodes::knowledge_answer(
                    state,
                    message,
                    self.model.as_ref(),
                    self.retriever.as_ref(),
                    self.retrieval_top_k,
                )
                .await
            }
            DialogueNode::AskIdentity => nodes::ask_identity(state, message),
            DialogueNode::CollectIdentity => nodes::collect_identity(state, message),
            DialogueNode::AskIssue => nodes::ask_issue(state, message),
            DialogueNode::Escalate => {
                nodes::escalate(state, message, self.model.as_ref()).await
            }
            DialogueNode::OutOfScope => nodes::out_of_scope(state, message),
        }
    }

    /// Invokes the ticket gateway exactly once for the escalating turn.
    ///
    /// Called only after the escalated state has been persisted; a failure
    /// here surfaces to the caller and is never retried on this turn.
    async fn hand_off_ticket(&self, state: &ThreadState) -> Result<Option<TicketId>, TurnError> {
        let (Some(issue_text), Some(user_email)) =
            (&state.pending_issue_text, &state.user_email)
        else {
            // Unreachable through the router; refuse to create a ticket
            // without the required fields rather than send a partial one.
            error!(
                thread_id = %state.thread_id,
                "escalated turn missing issue text or email, skipping handoff"
            );
            return Ok(None);
        };

        let ticket = NewTicket {
            thread_id: state.thread_id,
            tenant_id: state.tenant_id.clone(),
            issue_text: state
                .pending_issue_summary
                .clone()
                .unwrap_or_else(|| issue_text.clone()),
            bot_answer: state
                .context_summary
                .clone()
                .or_else(|| state.last_answer.clone()),
            user_name: state.user_name.clone(),
            user_email: user_email.clone(),
            dedup_key: state.thread_id.to_string(),
        };

        let ticket_id = self.tickets.create_ticket(ticket).await?;
        info!(
            thread_id = %state.thread_id,
            tenant_id = %state.tenant_id,
            ticket_id = %ticket_id,
            "support ticket created"
        );
        Ok(Some(ticket_id))
    }
}

#[async_trait]
impl<S, L, K, T> TurnProcessor for TurnEngine<S, L, K, T>
where
    S: StateStore,
    L: LanguageModel,
    K: KnowledgeRetriever,
    T: TicketGateway,
{
    async fn process_turn(&self, request: TurnRequest) -> Result<TurnOutcome, TurnError> {
        self.run_turn(request).await
    }
}
