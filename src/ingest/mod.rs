//! Dump ingestion: download, decompress, parse, load.
//!
//! Best-effort pipeline: per-file failures are logged and skipped so one bad
//! dump never aborts the refresh.

pub mod download;
pub mod parse;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::storage::Database;

pub use download::Downloader;
pub use parse::{ingest_file, parse_line};

/// Full data refresh: download and decompress the configured dumps, drop the
/// stored catalog, and stream the parsed records back in.
pub fn refresh(db: &mut Database, config: &Config) -> Result<usize> {
    let downloader = Downloader::new(&config.download, &config.data.data_dir)?;
    let files = downloader.fetch_all(&config.download.urls);

    if files.is_empty() {
        warn!(target: "ingest", "no dump files downloaded, keeping existing catalog");
        return Ok(0);
    }

    db.clear()?;
    let mut total = 0;
    for file in &files {
        match ingest_file(db, file, config.download.chunk_size) {
            Ok(count) => {
                info!(target: "ingest", file = %file.display(), count, "dump file loaded");
                total += count;
            }
            Err(err) => {
                warn!(target: "ingest", file = %file.display(), %err, "skipping dump file");
            }
        }
    }

    info!(target: "ingest", total, "refresh complete");
    Ok(total)
}
