//! Prompt builders for the language-model collaborator.
//!
//! Prompt text is behavior here: the classification format instruction and
//! the grounded-answer contract are what the parsing and fallback logic on
//! the other side rely on.

use super::intent::Intent;

/// Builds the intent-classification prompt.
///
/// The model is asked for a JSON object with a single `intent` field drawn
/// from the closed label set.
pub fn classification(message: &str) -> String {
    format!(
        "You are an enterprise customer-support intent classifier.\n\
         \n\
         Classify the message into ONE intent:\n\
         - greeting (hello, hi, thanks, ok, bye)\n\
         - faq (company policy / product / service)\n\
         - followup (related to previous answer)\n\
         - small_talk (hmm, okay, got it)\n\
         - escalation_request (contact human, raise ticket)\n\
         - out_of_scope (weather, celebrities, unrelated)\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         Respond with a JSON object of the form {{\"intent\": \"<label>\"}} and nothing else."
    )
}

/// Builds the retrieval query for a possible follow-up question.
///
/// The previous context summary, when present, is prepended so the search
/// and the answer stay anchored to the prior exchange.
pub fn combined_query(context_summary: Option<&str>, query: &str) -> String {
    match context_summary {
        Some(summary) if !summary.trim().is_empty() => {
            format!("Previous context:\n{summary}\n\nUser follow-up:\n{query}")
        }
        _ => query.to_string(),
    }
}

/// Builds the grounded-answer prompt over retrieved passages.
pub fn grounded_answer(question: &str, context: &str) -> String {
    format!(
        "You are a factual customer support assistant. Answer the QUESTION using ONLY the \
         provided CONTEXT. If the CONTEXT does not contain the answer, reply exactly: \
         \"I'm sorry, I don't have that information in the provided company documents. \
         Please ask a question related to the company's documentation or contact human \
         support for other issues.\" Keep answers concise (1-3 sentences).\n\n\
         QUESTION: {question}\n\nCONTEXT:\n{context}"
    )
}

/// Builds the one-line rolling summary prompt for a knowledge answer.
pub fn answer_summary(answer: &str) -> String {
    format!("Summarize this policy in one line:\n{answer}")
}

/// Builds the brief small-talk reply prompt.
pub fn small_talk(message: &str) -> String {
    format!("Reply politely and briefly to: {message}")
}

/// Builds the one-sentence issue summary prompt used for ticket creation.
pub fn issue_summary(issue: &str) -> String {
    format!(
        "Summarize the following customer support issue in one clear sentence, \
         focusing only on the user's problem:\n\n{issue}"
    )
}

/// Extracts an intent label from the model's classification response.
///
/// Accepts a bare JSON object, a JSON object embedded in surrounding prose,
/// or a bare label; anything else is `None` and the caller falls back to the
/// default label.
pub fn parse_intent_response(text: &str) -> Option<Intent> {
    #[derive(serde::Deserialize)]
    struct LabelledIntent {
        intent: String,
    }

    let trimmed = text.trim();

    if let Ok(parsed) = serde_json::from_str::<LabelledIntent>(trimmed) {
        return Intent::from_label(&parsed.intent);
    }

    // Models occasionally wrap the object in prose or code fences.
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(parsed) = serde_json::from_str::<LabelledIntent>(&trimmed[start..=end]) {
                return Intent::from_label(&parsed.intent);
            }
        }
    }

    Intent::from_label(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_prompt_enumerates_all_labels() {
        let prompt = classification("where is my order?");
        for intent in Intent::ALL {
            assert!(
                prompt.contains(intent.as_label()),
                "prompt should mention {}",
                intent.as_label()
            );
        }
        assert!(prompt.contains("where is my order?"));
    }

    #[test]
    fn combined_query_prepends_summary() {
        let q = combined_query(Some("Returns accepted within 30 days."), "what about exchanges?");
        assert!(q.starts_with("Previous context:\nReturns accepted within 30 days."));
        assert!(q.ends_with("User follow-up:\nwhat about exchanges?"));
    }

    #[test]
    fn combined_query_without_summary_is_the_query() {
        assert_eq!(combined_query(None, "what is the return policy"), "what is the return policy");
        assert_eq!(combined_query(Some("  "), "q"), "q");
    }

    #[test]
    fn grounded_answer_embeds_question_and_context() {
        let prompt = grounded_answer("return window?", "Returns within 30 days.");
        assert!(prompt.contains("QUESTION: return window?"));
        assert!(prompt.contains("CONTEXT:\nReturns within 30 days."));
    }

    mod intent_parsing {
        use super::*;

        #[test]
        fn parses_bare_json_object() {
            assert_eq!(
                parse_intent_response("{\"intent\": \"faq\"}"),
                Some(Intent::Faq)
            );
        }

        #[test]
        fn parses_object_embedded_in_prose() {
            assert_eq!(
                parse_intent_response("Sure! Here you go: {\"intent\": \"greeting\"} Hope that helps."),
                Some(Intent::Greeting)
            );
        }

        #[test]
        fn parses_bare_label() {
            assert_eq!(parse_intent_response("escalation_request"), Some(Intent::EscalationRequest));
        }

        #[test]
        fn rejects_unknown_labels() {
            assert_eq!(parse_intent_response("{\"intent\": \"banter\"}"), None);
            assert_eq!(parse_intent_response("no idea"), None);
            assert_eq!(parse_intent_response(""), None);
        }
    }
}
