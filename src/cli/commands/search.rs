//! tome search - Query stored books by topic

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};

use crate::app::AppContext;
use crate::error::Result;
use crate::ingest;
use crate::matching::{match_topic, match_topic_fuzzy, DEFAULT_FUZZY_THRESHOLD};
use crate::openlibrary::DetailClient;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// The topics to search by
    pub topics: Vec<String>,

    /// Download data and rebuild the catalog before searching
    #[arg(long)]
    pub refresh: bool,

    /// Print results to the console instead of writing the output file
    #[arg(long)]
    pub console: bool,

    /// Match topics by similarity as well as by substring
    #[arg(long)]
    pub fuzzy: bool,

    /// Minimum best-match score a topic must exceed in fuzzy mode
    #[arg(long, default_value_t = DEFAULT_FUZZY_THRESHOLD, requires = "fuzzy")]
    pub fuzzy_threshold: f64,

    /// Write results to this path instead of the configured output path
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let mut db = ctx.open_db()?;

    if args.refresh {
        let loaded = ingest::refresh(&mut db, &ctx.config)?;
        info!(target: "search", loaded, "catalog refreshed");
    }

    if args.topics.is_empty() {
        println!("No topics were provided.");
        return Ok(());
    }

    let records = db.fetch_all()?;
    debug!(target: "search", records = records.len(), topics = ?args.topics, "matching catalog");

    let keys: Vec<String> = records
        .into_iter()
        .filter(|record| {
            if args.fuzzy {
                match_topic_fuzzy(&record.subjects, &args.topics, args.fuzzy_threshold)
            } else {
                match_topic(&record.subjects, &args.topics)
            }
        })
        .map(|record| record.key)
        .collect();
    info!(target: "search", matched = keys.len(), "topic matching complete");

    let client = DetailClient::new(&ctx.config.openlibrary)?;
    let books = client.fetch_details(&keys);

    if args.console {
        for book in &books {
            println!("{}", serde_json::to_string(book)?);
        }
        return Ok(());
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&ctx.config.data.output_path));
    write_ndjson(&output_path, &books)?;
    println!("{} books written to {}", books.len(), output_path.display());
    Ok(())
}

/// Write one JSON document per line.
fn write_ndjson(path: &std::path::Path, books: &[serde_json::Value]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    for book in books {
        serde_json::to_writer(&mut file, book)?;
        file.write_all(b"\n")?;
    }
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn ndjson_output_is_one_document_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/output.json");
        let books = vec![
            serde_json::json!({"title": "Dune"}),
            serde_json::json!({"title": "Foundation"}),
        ];
        write_ndjson(&path, &books).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(lines[0]).unwrap()["title"],
            "Dune"
        );
    }
}
