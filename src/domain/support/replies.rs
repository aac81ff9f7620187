//! Fixed user-facing reply strings.
//!
//! These are part of the conversational contract: tests and downstream
//! transcripts match on them verbatim, so edits here are behavior changes.

/// Returned by the knowledge node when retrieval produced no passages.
pub const NO_KNOWLEDGE_MATCH: &str = "I could not find relevant information in our \
     knowledge base. Please rephrase your question or request human support.";

/// Returned by the knowledge node when answer synthesis itself failed.
pub const KNOWLEDGE_UNAVAILABLE: &str = "I'm having trouble accessing the knowledge \
     base right now. Please try again later or contact support.";

/// First step of the escalation funnel: ask for name and email.
pub const ASK_IDENTITY: &str = "I understand this issue may need human support.\n\n\
     Before I raise a support ticket, please share your full name and email address \
     so our support team can contact you.";

/// Re-prompt when the identity message carried no valid email.
pub const IDENTITY_RETRY: &str = "To create a support ticket, I need a valid email \
     address.\n\nPlease reply with your full name and email in one message, for \
     example: John Doe, john.doe@example.com.";

/// Ask for the full issue once identity is already known.
pub const ASK_ISSUE: &str = "I understand this needs human support.\n\nBefore I raise \
     a ticket, please describe your full issue clearly in one message.";

/// Acknowledgment once the ticket has been raised.
pub const TICKET_RAISED: &str = "Thank you. I've raised a support ticket for you. \
     Our human support team will contact you shortly.";

/// Scope reminder for unrelated questions.
pub const OUT_OF_SCOPE: &str =
    "I can help with questions related to the company and its services.";

/// Canned reply when small-talk synthesis fails.
pub const SMALL_TALK_FALLBACK: &str =
    "Hi! I'm the support assistant. How can I help you today?";

/// Name used when the identity message contained an email but no name.
pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";

/// Thank-you prompt after identity collection, asking for the issue text.
pub fn identity_thanks(name: &str) -> String {
    format!(
        "Thanks {name}. I'll connect you with our human support team.\n\n\
         Before I raise a ticket, please describe your full issue clearly in one \
         message so we can help you faster."
    )
}
