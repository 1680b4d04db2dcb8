//! Topic matching core.
//!
//! Pure, synchronous, stateless routines that decide whether a stored book's
//! subject string satisfies a topic query, plus a standalone similarity
//! utility for ranking candidate strings against a user input.

pub mod similarity;
pub mod tokenize;
pub mod topic;

pub use similarity::{best_match, ratio};
pub use tokenize::significant_words;
pub use topic::{match_topic, match_topic_fuzzy, DEFAULT_FUZZY_THRESHOLD};
