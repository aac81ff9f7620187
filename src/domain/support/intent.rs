//! Intent labels for a single user message.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Closed set of intents the classifier can produce for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Hello, hi, thanks, ok, bye.
    Greeting,
    /// Question about company policy, product, or service.
    Faq,
    /// Related to the previous answer.
    Followup,
    /// Hmm, okay, got it.
    SmallTalk,
    /// Contact a human, raise a ticket.
    EscalationRequest,
    /// Weather, celebrities, anything unrelated.
    OutOfScope,
}

impl Intent {
    /// All labels, in classification-prompt order.
    pub const ALL: [Intent; 6] = [
        Intent::Greeting,
        Intent::Faq,
        Intent::Followup,
        Intent::SmallTalk,
        Intent::EscalationRequest,
        Intent::OutOfScope,
    ];

    /// The wire label for this intent.
    pub fn as_label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Faq => "faq",
            Intent::Followup => "followup",
            Intent::SmallTalk => "small_talk",
            Intent::EscalationRequest => "escalation_request",
            Intent::OutOfScope => "out_of_scope",
        }
    }

    /// Parses a wire label, ignoring surrounding whitespace and case.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "greeting" => Some(Intent::Greeting),
            "faq" => Some(Intent::Faq),
            "followup" => Some(Intent::Followup),
            "small_talk" => Some(Intent::SmallTalk),
            "escalation_request" => Some(Intent::EscalationRequest),
            "out_of_scope" => Some(Intent::OutOfScope),
            _ => None,
        }
    }
}

static GREETING_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(hi|hello|hey|namaste|how are you|hiya)\b")
        .expect("greeting pattern is valid")
});

/// Deterministic greeting pre-check.
///
/// A case-insensitive word match against a small fixed set; when it fires the
/// classifier skips the model call entirely.
pub fn is_greeting(message: &str) -> bool {
    GREETING_WORDS.is_match(message)
}
