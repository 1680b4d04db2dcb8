//! tome similar - Rank candidate strings by similarity to an input

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::error::Result;
use crate::matching::best_match;

#[derive(Args, Debug)]
pub struct SimilarArgs {
    /// The string to compare against
    pub input: String,

    /// Candidate strings to rank
    #[arg(required = true)]
    pub candidates: Vec<String>,
}

#[derive(Serialize)]
struct SimilarReport<'a> {
    input: &'a str,
    best_match: Option<&'a str>,
    score: f64,
}

pub fn run(_ctx: &AppContext, args: &SimilarArgs) -> Result<()> {
    let best = best_match(args.candidates.iter().map(String::as_str), &args.input);
    let (score, best_match) = match best {
        Some((score, candidate)) => (score, Some(candidate)),
        None => (0.0, None),
    };

    emit_json(&SimilarReport {
        input: &args.input,
        best_match,
        score,
    })
}
