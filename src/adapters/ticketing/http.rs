//! HTTP adapter for the ticketing collaborator.
//!
//! Ships the handoff payload to the ticket service. The payload carries a
//! deduplication key so the service (or an ops-layer retry) can make
//! creation idempotent; this adapter itself never retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::TicketId;
use crate::ports::{NewTicket, TicketError, TicketGateway};

/// Configuration for the ticket-service client.
#[derive(Debug, Clone)]
pub struct TicketServiceConfig {
    /// Base URL of the ticket service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl TicketServiceConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP implementation of the [`TicketGateway`] port.
pub struct HttpTicketGateway {
    config: TicketServiceConfig,
    client: Client,
}

impl HttpTicketGateway {
    /// Creates a new gateway with the given configuration.
    pub fn new(config: TicketServiceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn tickets_url(&self) -> String {
        format!("{}/v1/tickets", self.config.base_url)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> TicketError {
        if error.is_timeout() {
            TicketError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else {
            TicketError::network(error.to_string())
        }
    }
}

#[async_trait]
impl TicketGateway for HttpTicketGateway {
    async fn create_ticket(&self, ticket: NewTicket) -> Result<TicketId, TicketError> {
        let request = TicketRequest::from(&ticket);

        let response = self
            .client
            .post(self.tickets_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TicketError::rejected(status.as_u16(), body));
        }

        let body: TicketResponse = response
            .json()
            .await
            .map_err(|e| TicketError::rejected(status.as_u16(), e.to_string()))?;

        TicketId::new(body.ticket_id)
            .map_err(|_| TicketError::rejected(status.as_u16(), "empty ticket id in response"))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketRequest {
    thread_id: String,
    tenant_id: String,
    issue_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bot_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    user_email: String,
    dedup_key: String,
}

impl From<&NewTicket> for TicketRequest {
    fn from(ticket: &NewTicket) -> Self {
        Self {
            thread_id: ticket.thread_id.to_string(),
            tenant_id: ticket.tenant_id.to_string(),
            issue_text: ticket.issue_text.clone(),
            bot_answer: ticket.bot_answer.clone(),
            user_name: ticket.user_name.clone(),
            user_email: ticket.user_email.clone(),
            dedup_key: ticket.dedup_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TicketResponse {
    ticket_id: String,
}
