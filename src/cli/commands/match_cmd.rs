//! tome match - Test a subject string against topics

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::error::Result;
use crate::matching::{match_topic, match_topic_fuzzy, DEFAULT_FUZZY_THRESHOLD};

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Subject string to test, e.g. "Science, Fiction, History"
    #[arg(long, short)]
    pub subjects: String,

    /// The topics to test for
    pub topics: Vec<String>,

    /// Match topics by similarity as well as by substring
    #[arg(long)]
    pub fuzzy: bool,

    /// Minimum best-match score a topic must exceed in fuzzy mode
    #[arg(long, default_value_t = DEFAULT_FUZZY_THRESHOLD, requires = "fuzzy")]
    pub fuzzy_threshold: f64,
}

#[derive(Serialize)]
struct MatchReport<'a> {
    subjects: &'a str,
    topics: &'a [String],
    fuzzy: bool,
    matched: bool,
}

pub fn run(_ctx: &AppContext, args: &MatchArgs) -> Result<()> {
    let matched = if args.fuzzy {
        match_topic_fuzzy(&args.subjects, &args.topics, args.fuzzy_threshold)
    } else {
        match_topic(&args.subjects, &args.topics)
    };

    emit_json(&MatchReport {
        subjects: &args.subjects,
        topics: &args.topics,
        fuzzy: args.fuzzy,
        matched,
    })
}
