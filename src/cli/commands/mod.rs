//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod match_cmd;
pub mod refresh;
pub mod search;
pub mod similar;
pub mod status;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::Refresh(args) => refresh::run(ctx, args),
        Commands::Status(args) => status::run(ctx, args),
        Commands::Match(args) => match_cmd::run(ctx, args),
        Commands::Similar(args) => similar::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search stored books by topic
    Search(search::SearchArgs),

    /// Download the dumps and rebuild the catalog
    Refresh(refresh::RefreshArgs),

    /// Show catalog status
    Status(status::StatusArgs),

    /// Test a subject string against topics
    Match(match_cmd::MatchArgs),

    /// Rank candidate strings by similarity to an input
    Similar(similar::SimilarArgs),
}
