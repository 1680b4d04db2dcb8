//! Ratcliff/Obershelp string similarity and best-match ranking.

use std::collections::HashMap;

use tracing::trace;

use crate::matching::tokenize::significant_words;

/// Normalized similarity of two strings in `[0, 1]`.
///
/// Computed as `2*M / T` where `M` is the number of characters covered by the
/// longest matching blocks shared between the strings and `T` is the combined
/// length. Two empty strings are identical, so their ratio is 1.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Total size of the matching blocks: find the longest common block, then
/// recurse into the unmatched regions on either side (iteratively, via an
/// explicit stack).
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            pending.push((alo, i, blo, j));
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Longest block of characters common to `a[alo..ahi]` and `b[blo..bhi]`,
/// returned as `(start_a, start_b, size)`. Earliest block wins on ties.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0usize);
    // j2len[j] = length of the common run ending at a[i], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next: HashMap<usize, usize> = HashMap::new();
        for j in blo..bhi {
            if b[j] == a[i] {
                let run = if j > blo {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
                next.insert(j, run);
            }
        }
        j2len = next;
    }
    best
}

/// Rank `candidates` against `input` and return the best score and candidate.
///
/// Each candidate's score is its full-string [`ratio`] against the input,
/// weighted by the mean of the best per-word ratios: every significant word
/// of the input is compared to every significant word of the candidate and
/// the maximum per input word is kept. When the input has no significant
/// words the weighting is skipped and the full-string ratio stands alone.
///
/// Ties keep the first-seen maximum. Returns `None` when the candidate list
/// is empty or no candidate scores above zero.
pub fn best_match<'a, I>(candidates: I, input: &str) -> Option<(f64, &'a str)>
where
    I: IntoIterator<Item = &'a str>,
{
    let input_words = significant_words(input);

    let mut best_score = 0.0;
    let mut best: Option<&str> = None;
    for candidate in candidates {
        let full_ratio = ratio(input, candidate);

        let word_factor = if input_words.is_empty() {
            1.0
        } else {
            let candidate_words = significant_words(candidate);
            let sum: f64 = input_words
                .iter()
                .map(|input_word| {
                    candidate_words
                        .iter()
                        .map(|candidate_word| ratio(input_word, candidate_word))
                        .fold(0.0, f64::max)
                })
                .sum();
            sum / input_words.len() as f64
        };

        let score = full_ratio * word_factor;
        trace!(target: "matching", candidate, score, "scored candidate");

        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }

    best.map(|candidate| (best_score, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(ratio("science", "science"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn ratio_matches_sequence_matcher_reference() {
        // cross-checked against Python's difflib.SequenceMatcher ratio()
        assert!((ratio("apples", "apple") - 10.0 / 11.0).abs() < 1e-9);
        assert!((ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
        assert!((ratio("apples", "orange") - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_is_symmetric_on_match_count() {
        // the matched-block count is order-independent even when the block
        // positions differ
        let forward = ratio("banana", "ananas");
        let backward = ratio("ananas", "banana");
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn best_match_prefers_near_identical_candidate() {
        let candidates = ["apple", "orange", "banana"];
        let (score, best) = best_match(candidates.iter().copied(), "apples").unwrap();
        assert_eq!(best, "apple");
        assert!(score > 0.8, "near-identical match should exceed 0.8, got {score}");

        let orange = ratio("apples", "orange");
        let banana = ratio("apples", "banana");
        assert!(score > orange);
        assert!(score > banana);
    }

    #[test]
    fn best_match_keeps_first_seen_maximum() {
        // identical candidates tie exactly; strict > keeps the first
        let candidates = ["science", "science"];
        let (score, best) = best_match(candidates.iter().copied(), "science").unwrap();
        assert_eq!(best, "science");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn best_match_empty_candidates_is_none() {
        assert!(best_match([], "anything").is_none());
    }

    #[test]
    fn best_match_all_zero_scores_is_none() {
        assert!(best_match(["xyz"], "abc").is_none());
    }

    #[test]
    fn input_without_significant_words_falls_back_to_full_ratio() {
        // "a" tokenizes to nothing; scoring must not divide by zero and the
        // full-string ratio alone ranks the candidates
        let (score, best) = best_match(["a", "zzz"], "a").unwrap();
        assert_eq!(best, "a");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn candidate_without_significant_words_contributes_zero_word_factor() {
        // the candidate "a" has no significant words, so every input word's
        // best per-word ratio is zero and the item score collapses
        assert!(best_match(["a"], "apples").is_none());
    }
}
