//! Ticket Handoff Port - durable creation of a human-support ticket.
//!
//! The engine invokes this at most once per thread, immediately after the
//! escalating turn's state commit, and never retries on the same turn. The
//! `dedup_key` lets an ops-layer retry stay idempotent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TenantId, ThreadId, TicketId};

/// Port for support-ticket creation.
#[async_trait]
pub trait TicketGateway: Send + Sync {
    /// Creates a ticket and returns its identifier.
    async fn create_ticket(&self, ticket: NewTicket) -> Result<TicketId, TicketError>;
}

/// Payload for a new support ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    /// Thread the escalation came from.
    pub thread_id: ThreadId,
    /// Tenant scope; a ticket never crosses tenant boundaries.
    pub tenant_id: TenantId,
    /// The customer's problem (summary preferred over the raw capture).
    pub issue_text: String,
    /// What the agent last told the customer, for triage context.
    pub bot_answer: Option<String>,
    /// Customer name as collected.
    pub user_name: Option<String>,
    /// Customer email as collected.
    pub user_email: String,
    /// Idempotency key; one escalation per thread, so the thread id.
    pub dedup_key: String,
}

/// Ticket gateway errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TicketError {
    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The ticketing service rejected the request.
    #[error("ticket rejected ({status}): {message}")]
    Rejected {
        /// HTTP-ish status from the service.
        status: u16,
        /// Error details.
        message: String,
    },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl TicketError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a rejected error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
