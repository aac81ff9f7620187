//! Ticket-handoff adapters.

mod http;
mod mock;

pub use http::{HttpTicketGateway, TicketServiceConfig};
pub use mock::RecordingTicketGateway;
