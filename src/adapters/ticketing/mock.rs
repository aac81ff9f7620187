//! Recording ticket gateway for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::TicketId;
use crate::ports::{NewTicket, TicketError, TicketGateway};

/// Recording implementation of the [`TicketGateway`] port.
///
/// Stores every payload it receives; tests assert on the recorded tickets
/// to verify the at-most-once handoff.
#[derive(Debug, Clone, Default)]
pub struct RecordingTicketGateway {
    created: Arc<Mutex<Vec<NewTicket>>>,
    fail: bool,
}

impl RecordingTicketGateway {
    /// Creates a gateway that accepts every ticket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway whose every call fails with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of tickets created.
    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    /// All recorded tickets, in creation order.
    pub fn tickets(&self) -> Vec<NewTicket> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketGateway for RecordingTicketGateway {
    async fn create_ticket(&self, ticket: NewTicket) -> Result<TicketId, TicketError> {
        if self.fail {
            return Err(TicketError::network("mock gateway failure"));
        }

        let mut created = self.created.lock().unwrap();
        created.push(ticket);
        let id = format!("TCK-{:04}", created.len());
        Ok(TicketId::new(id).expect("generated ticket id is non-empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{TenantId, ThreadId};

    fn sample_ticket() -> NewTicket {
        let thread_id = ThreadId::new();
        NewTicket {
            thread_id,
            tenant_id: TenantId::new("acme").unwrap(),
            issue_text: "issue".to_string(),
            bot_answer: None,
            user_name: None,
            user_email: "jane@example.com".to_string(),
            dedup_key: thread_id.to_string(),
        }
    }

    #[tokio::test]
    async fn records_created_tickets() {
        let gateway = RecordingTicketGateway::new();

        let first = gateway.create_ticket(sample_ticket()).await.unwrap();
        let second = gateway.create_ticket(sample_ticket()).await.unwrap();

        assert_eq!(gateway.created_count(), 2);
        assert_eq!(first.as_str(), "TCK-0001");
        assert_eq!(second.as_str(), "TCK-0002");
    }

    #[tokio::test]
    async fn failing_variant_records_nothing() {
        let gateway = RecordingTicketGateway::failing();
        let result = gateway.create_ticket(sample_ticket()).await;

        assert!(matches!(result, Err(TicketError::Network(_))));
        assert_eq!(gateway.created_count(), 0);
    }
}
