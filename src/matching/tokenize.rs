//! Adaptive significant-word extraction.

/// Split `input` on whitespace and keep only the words that meet an adaptive
/// minimum-length threshold.
///
/// The threshold is derived from the word count and the median length of the
/// multi-character words, so that short filler words (articles, prepositions)
/// drop out of longer phrases without a fixed stop-word list:
///
/// - 3+ words with median length > 4: keep words of length >= 5
/// - 2+ words with median length > 3: keep words of length >= 4
/// - otherwise: keep words of length >= 2
///
/// Empty input yields an empty list; the median is never taken over an empty
/// sequence.
pub fn significant_words(input: &str) -> Vec<&str> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let mut lengths: Vec<usize> = words
        .iter()
        .map(|word| word.chars().count())
        .filter(|&len| len > 1)
        .collect();

    let mut min_length = 2;
    if let Some(median) = median(&mut lengths) {
        if words.len() >= 3 && median > 4.0 {
            min_length = 5;
        } else if words.len() >= 2 && median > 3.0 {
            min_length = 4;
        }
    }

    words
        .into_iter()
        .filter(|word| word.chars().count() >= min_length)
        .collect()
}

/// Median of a length sample: mean of the two middle values for even-sized
/// samples, `None` for an empty sample.
fn median(values: &mut [usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) as f64 / 2.0)
    } else {
        Some(values[mid] as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(significant_words("").is_empty());
        assert!(significant_words("   ").is_empty());
    }

    #[test]
    fn single_word_falls_through_to_default_threshold() {
        assert_eq!(significant_words("a"), Vec::<&str>::new());
        assert_eq!(significant_words("ab"), vec!["ab"]);
    }

    #[test]
    fn staircase_phrase_raises_threshold_to_four() {
        // lengths of the multi-char words are [2,3,4,5], median 3.5, so the
        // 2+ words / median > 3 branch applies
        assert_eq!(significant_words("a bb ccc dddd eeeee"), vec!["dddd", "eeeee"]);
    }

    #[test]
    fn short_words_keep_default_threshold() {
        // lengths [2,2,3], median 2, no branch fires; length-1 words drop
        assert_eq!(significant_words("a is of the"), vec!["is", "of", "the"]);
    }

    #[test]
    fn long_phrase_drops_fillers() {
        // lengths [7,7,2,8,5], median 7 > 4 with 5 words: threshold 5
        assert_eq!(
            significant_words("science fiction in victoria times"),
            vec!["science", "fiction", "victoria", "times"]
        );
    }

    #[test]
    fn two_long_words_use_middle_threshold() {
        // 2 words, median 6.5 > 3 (not the 3-word branch): threshold 4
        assert_eq!(significant_words("wizard of"), vec!["wizard"]);
        assert_eq!(significant_words("ancient history"), vec!["ancient", "history"]);
    }

    #[test]
    fn lengths_are_counted_in_chars_not_bytes() {
        // each word is three chars (but more bytes); median 3 keeps threshold 2
        assert_eq!(significant_words("äöü éèê"), vec!["äöü", "éèê"]);
    }

    #[test]
    fn idempotent_over_repeat_calls() {
        let first = significant_words("science fiction in victoria times");
        let second = significant_words("science fiction in victoria times");
        assert_eq!(first, second);
    }
}
