//! Deterministic policy-breach detection.
//!
//! A breach is a number in the user's message that strictly exceeds the
//! policy window learned from an earlier knowledge answer. The check is
//! independent of the classifier and fires even when the classifier
//! disagrees.

use once_cell::sync::Lazy;
use regex::Regex;

use super::state::ThreadState;

static DIGIT_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

static DAY_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:business\s*)?days?").expect("day-count pattern is valid")
});

/// Returns true iff a policy threshold has been learned and the largest
/// integer in `query` strictly exceeds it.
///
/// Digit runs too long for `u64` saturate to `u64::MAX`.
pub fn is_breach(state: &ThreadState, query: &str) -> bool {
    let Some(threshold) = state.policy_threshold_days else {
        return false;
    };

    DIGIT_RUNS
        .find_iter(query)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .max()
        .is_some_and(|largest| largest > threshold)
}

/// Extracts a policy window from an answer text.
///
/// The first `<N> day(s)` occurrence wins; "business days" counts too.
pub fn extract_policy_days(answer: &str) -> Option<u64> {
    DAY_COUNT
        .captures(answer)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{TenantId, ThreadId};

    fn state_with_threshold(days: Option<u64>) -> ThreadState {
        let state = ThreadState::new(ThreadId::new(), TenantId::new("acme").unwrap());
        match days {
            Some(d) => state.with_policy_threshold(d),
            None => state,
        }
    }

    mod breach_detection {
        use super::*;

        #[test]
        fn no_threshold_means_no_breach() {
            let state = state_with_threshold(None);
            assert!(!is_breach(&state, "can I return after 45 days"));
        }

        #[test]
        fn no_digits_means_no_breach() {
            let state = state_with_threshold(Some(30));
            assert!(!is_breach(&state, "can I still return this"));
        }

        #[test]
        fn breach_when_max_exceeds_threshold() {
            let state = state_with_threshold(Some(30));
            assert!(is_breach(&state, "can I return after 45 days"));
        }

        #[test]
        fn no_breach_at_exact_threshold() {
            let state = state_with_threshold(Some(30));
            assert!(!is_breach(&state, "return after 30 days"));
        }

        #[test]
        fn uses_the_maximum_integer_present() {
            let state = state_with_threshold(Some(30));
            assert!(is_breach(&state, "I bought 2 items 45 days ago"));
            assert!(!is_breach(&state, "I bought 2 items 15 days ago"));
        }

        #[test]
        fn ignores_surrounding_text() {
            let state = state_with_threshold(Some(30));
            assert!(is_breach(&state, "order#99-late"));
        }

        #[test]
        fn oversized_digit_runs_saturate() {
            let state = state_with_threshold(Some(30));
            assert!(is_breach(&state, "it was 99999999999999999999999 days ago"));
        }
    }

    mod policy_learning {
        use super::*;

        #[test]
        fn extracts_first_day_count() {
            assert_eq!(
                extract_policy_days("Returns are accepted within 30 days of purchase."),
                Some(30)
            );
        }

        #[test]
        fn first_match_wins() {
            assert_eq!(
                extract_policy_days("within 30 days, extended to 60 days for members"),
                Some(30)
            );
        }

        #[test]
        fn accepts_singular_and_business_days() {
            assert_eq!(extract_policy_days("ships in 1 day"), Some(1));
            assert_eq!(extract_policy_days("within 5 business days"), Some(5));
            assert_eq!(extract_policy_days("within 14 BUSINESS DAYS"), Some(14));
        }

        #[test]
        fn returns_none_without_day_pattern() {
            assert_eq!(extract_policy_days("contact support for details"), None);
            assert_eq!(extract_policy_days("order 123 was shipped"), None);
        }
    }
}
