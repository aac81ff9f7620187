//! Per-thread conversational state.
//!
//! One `ThreadState` exists per conversation thread. It is an immutable value
//! type: node handlers never mutate it in place but derive the next state
//! through the transition methods below, which keeps the escalation
//! invariants checkable in isolation.
//!
//! # Invariants
//!
//! - At most one of `awaiting_identity` / `awaiting_issue_description` is
//!   true at any time.
//! - Once `escalated` is true it stays true for the lifetime of the thread,
//!   and both awaiting flags are false.
//! - `user_name` / `user_email` are written once and never overwritten.
//! - `policy_threshold_days`, once learned, is only ever replaced by a newer
//!   learned value, never unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TenantId, ThreadId};

/// The durable snapshot of one conversation thread between turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadState {
    /// Stable opaque identifier of the thread.
    pub thread_id: ThreadId,
    /// Tenant scope for retrieval and ticketing; immutable after creation.
    pub tenant_id: TenantId,
    /// Most recent user message.
    pub last_query: Option<String>,
    /// Most recent agent answer.
    pub last_answer: Option<String>,
    /// Rolling one-line summary of the last knowledge answer, used to
    /// disambiguate follow-up questions.
    pub context_summary: Option<String>,
    /// Policy window (in days) learned from a prior knowledge answer.
    pub policy_threshold_days: Option<u64>,
    /// Count of consecutive out-of-scope turns.
    pub failure_count: u32,
    /// Sticky escalation marker; never reset within a thread's lifetime.
    pub escalated: bool,
    /// True while the next message is expected to contain name and email.
    pub awaiting_identity: bool,
    /// True while the next message is expected to be the issue description.
    pub awaiting_issue_description: bool,
    /// Customer name, collected once during the escalation funnel.
    pub user_name: Option<String>,
    /// Customer email, collected once during the escalation funnel.
    pub user_email: Option<String>,
    /// Issue text captured for ticket creation; cleared after the handoff.
    pub pending_issue_text: Option<String>,
    /// One-sentence summary of the pending issue; cleared after the handoff.
    pub pending_issue_summary: Option<String>,
    /// When the thread was first seen.
    pub created_at: DateTime<Utc>,
    /// When the thread was last written.
    pub updated_at: DateTime<Utc>,
}

impl ThreadState {
    /// Creates the default state for a thread's first turn.
    pub fn new(thread_id: ThreadId, tenant_id: TenantId) -> Self {
        let now = Utc::now();
        Self {
            thread_id,
            tenant_id,
            last_query: None,
            last_answer: None,
            context_summary: None,
            policy_threshold_days: None,
            failure_count: 0,
            escalated: false,
            awaiting_identity: false,
            awaiting_issue_description: false,
            user_name: None,
            user_email: None,
            pending_issue_text: None,
            pending_issue_summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn touched(mut self) -> Self {
        self.updated_at = Utc::now();
        self
    }

    /// Records the turn's query/answer pair.
    pub fn with_exchange(mut self, query: impl Into<String>, answer: impl Into<String>) -> Self {
        self.last_query = Some(query.into());
        self.last_answer = Some(answer.into());
        self.touched()
    }

    /// Replaces the rolling context summary.
    pub fn with_context_summary(mut self, summary: impl Into<String>) -> Self {
        self.context_summary = Some(summary.into());
        self.touched()
    }

    /// Replaces the learned policy threshold.
    pub fn with_policy_threshold(mut self, days: u64) -> Self {
        self.policy_threshold_days = Some(days);
        self.touched()
    }

    /// Counts an out-of-scope turn.
    pub fn with_scope_failure(mut self) -> Self {
        self.failure_count += 1;
        self.touched()
    }

    /// Enters identity collection: the next message should carry name/email.
    pub fn awaiting_identity_now(mut self) -> Self {
        self.awaiting_identity = true;
        self.awaiting_issue_description = false;
        self.touched()
    }

    /// Records collected identity and moves on to issue collection.
    ///
    /// Identity fields are write-once; if they were already set the existing
    /// values win.
    pub fn with_identity(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        if self.user_email.is_none() {
            self.user_name = Some(name.into());
            self.user_email = Some(email.into());
        }
        self.awaiting_identity = false;
        self.awaiting_issue_description = true;
        self.touched()
    }

    /// Enters issue collection: the next message is the issue description.
    pub fn awaiting_issue_now(mut self) -> Self {
        self.awaiting_identity = false;
        self.awaiting_issue_description = true;
        self.touched()
    }

    /// Stores the captured issue text for the escalation turn.
    pub fn with_pending_issue(mut self, text: impl Into<String>) -> Self {
        self.pending_issue_text = Some(text.into());
        self.touched()
    }

    /// Marks the thread escalated, keeping the pending issue fields for the
    /// ticket handoff that follows within the same turn.
    pub fn escalated_now(mut self, summary: impl Into<String>) -> Self {
        self.escalated = true;
        self.awaiting_identity = false;
        self.awaiting_issue_description = false;
        self.pending_issue_summary = Some(summary.into());
        self.touched()
    }

    /// Drops the transient issue fields once the handoff turn has committed.
    pub fn with_pending_cleared(mut self) -> Self {
        self.pending_issue_text = None;
        self.pending_issue_summary = None;
        self.touched()
    }

    /// Checks the structural invariants listed in the module docs.
    pub fn invariants_hold(&self) -> bool {
        if self.awaiting_identity && self.awaiting_issue_description {
            return false;
        }
        if self.escalated && (self.awaiting_identity || self.awaiting_issue_description) {
            return false;
        }
        true
    }
}
