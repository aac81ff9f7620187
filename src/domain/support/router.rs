//! Dialogue routing: the decision table mapping a turn to the node that
//! handles it.
//!
//! The precedence order is load-bearing. Escalation stickiness dominates
//! everything; an in-progress identity or issue capture dominates fresh
//! intent routing; the deterministic policy-breach override fires even when
//! the classifier disagrees.

use serde::{Deserialize, Serialize};

use super::intent::Intent;
use super::state::ThreadState;

/// The closed set of nodes a turn can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueNode {
    SmallTalk,
    KnowledgeAnswer,
    AskIdentity,
    CollectIdentity,
    AskIssue,
    Escalate,
    OutOfScope,
}

impl DialogueNode {
    /// Returns true for the nodes that make up the escalation funnel.
    pub fn is_escalation_node(&self) -> bool {
        matches!(
            self,
            DialogueNode::AskIdentity
                | DialogueNode::CollectIdentity
                | DialogueNode::AskIssue
                | DialogueNode::Escalate
        )
    }
}

/// Selects the node for the current turn.
///
/// `policy_breached` is the Policy Breach Detector's verdict for the turn's
/// message, computed by the caller before routing.
pub fn route(state: &ThreadState, intent: Intent, policy_breached: bool) -> DialogueNode {
    // An escalated thread is ordinary conversation forever after; nothing
    // below this check may create another ticket.
    if state.escalated {
        return match intent {
            Intent::Greeting | Intent::SmallTalk => DialogueNode::SmallTalk,
            Intent::Faq | Intent::Followup => DialogueNode::KnowledgeAnswer,
            _ => DialogueNode::SmallTalk,
        };
    }

    // Identity capture owns the turn regardless of what the message says.
    if state.awaiting_identity {
        return DialogueNode::CollectIdentity;
    }

    // The issue text arrived this turn; complete the handoff.
    if state.awaiting_issue_description && state.pending_issue_text.is_some() {
        return DialogueNode::Escalate;
    }

    if policy_breached {
        return if state.user_email.is_none() {
            DialogueNode::AskIdentity
        } else {
            DialogueNode::AskIssue
        };
    }

    if intent == Intent::EscalationRequest {
        return if state.user_email.is_none() {
            DialogueNode::AskIdentity
        } else {
            DialogueNode::AskIssue
        };
    }

    match intent {
        Intent::Greeting | Intent::SmallTalk => DialogueNode::SmallTalk,
        Intent::Faq | Intent::Followup => DialogueNode::KnowledgeAnswer,
        _ => DialogueNode::OutOfScope,
    }
}
