//! Topic membership tests for stored subject strings.

use crate::matching::similarity::best_match;

/// Score a topic must exceed in fuzzy mode to count as a match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.5;

/// Case-insensitive substring membership: true on the first topic found
/// within `subjects`, false when `subjects` is empty, no topic matches, or
/// `topics` is empty.
///
/// Pure and total; safe to call concurrently.
pub fn match_topic<S: AsRef<str>>(subjects: &str, topics: &[S]) -> bool {
    if subjects.is_empty() {
        return false;
    }
    let subjects = subjects.to_ascii_lowercase();
    topics
        .iter()
        .any(|topic| subjects.contains(&topic.as_ref().to_ascii_lowercase()))
}

/// Fuzzy variant: substring matches still win, and otherwise a topic matches
/// when its [`best_match`] score against the comma-separated subject entries
/// exceeds `threshold`.
///
/// This mode is never enabled implicitly; callers opt in explicitly.
pub fn match_topic_fuzzy<S: AsRef<str>>(subjects: &str, topics: &[S], threshold: f64) -> bool {
    if subjects.is_empty() {
        return false;
    }
    if match_topic(subjects, topics) {
        return true;
    }

    let entries: Vec<&str> = subjects
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();

    topics.iter().any(|topic| {
        best_match(entries.iter().copied(), topic.as_ref())
            .is_some_and(|(score, _)| score > threshold)
    })
}
