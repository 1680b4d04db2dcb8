//! Chunked parsing of the OpenLibrary editions dump.
//!
//! The dump is tab-separated with five columns (type, key, revision,
//! last_modified, json); the record payload lives in the final JSON column,
//! which may itself contain tabs, so lines are split at most four times.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use crate::error::Result;
use crate::storage::{BookRecord, Database};

/// Parse one dump line into a record.
///
/// Returns `None` for rows without a JSON column, with unparseable JSON, or
/// whose payload is missing `key` or `title`. Subjects are the comma-joined
/// entries of the `subjects` array, or empty when absent.
pub fn parse_line(line: &str) -> Option<BookRecord> {
    let json = line.splitn(5, '\t').nth(4)?;
    let book: serde_json::Value = serde_json::from_str(json).ok()?;

    let key = book.get("key")?.as_str()?.to_string();
    let title = book.get("title")?.as_str()?.to_string();
    let subjects = match book.get("subjects").and_then(|value| value.as_array()) {
        Some(entries) => entries.iter().filter_map(|entry| entry.as_str()).join(","),
        None => String::new(),
    };

    Some(BookRecord {
        key,
        title,
        subjects,
    })
}

/// Stream a decompressed dump file into storage in fixed-size batches.
///
/// Rows are flushed every `chunk_size` records; nothing from earlier chunks
/// is retained in memory. Malformed rows are counted and skipped.
pub fn ingest_file(db: &mut Database, path: &Path, chunk_size: usize) -> Result<usize> {
    let chunk_size = chunk_size.max(1);
    let reader = BufReader::new(File::open(path)?);

    let mut batch = Vec::with_capacity(chunk_size.min(100_000));
    let mut total = 0;
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Some(record) => batch.push(record),
            None => skipped += 1,
        }
        if batch.len() >= chunk_size {
            total += db.insert_batch(&batch)?;
            batch.clear();
        }
    }
    if !batch.is_empty() {
        total += db.insert_batch(&batch)?;
    }

    if skipped > 0 {
        debug!(target: "ingest", skipped, file = %path.display(), "rows skipped");
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn dump_line(key: &str, json: &str) -> String {
        format!("/type/edition\t{key}\t1\t2024-01-01T00:00:00\t{json}")
    }

    #[test]
    fn parses_key_title_and_joined_subjects() {
        let line = dump_line(
            "/books/OL1M",
            r#"{"key": "/books/OL1M", "title": "Dune", "subjects": ["Science Fiction", "Deserts"]}"#,
        );
        let record = parse_line(&line).unwrap();
        assert_eq!(record.key, "/books/OL1M");
        assert_eq!(record.title, "Dune");
        assert_eq!(record.subjects, "Science Fiction,Deserts");
    }

    #[test]
    fn missing_subjects_become_empty_string() {
        let line = dump_line("/books/OL2M", r#"{"key": "/books/OL2M", "title": "Plain"}"#);
        assert_eq!(parse_line(&line).unwrap().subjects, "");
    }

    #[test]
    fn rows_missing_key_or_title_are_skipped() {
        assert!(parse_line(&dump_line("/books/OL3M", r#"{"title": "No Key"}"#)).is_none());
        assert!(parse_line(&dump_line("/books/OL4M", r#"{"key": "/books/OL4M"}"#)).is_none());
    }

    #[test]
    fn malformed_rows_are_skipped() {
        assert!(parse_line("not a dump row").is_none());
        assert!(parse_line(&dump_line("/books/OL5M", "{broken json")).is_none());
    }

    #[test]
    fn json_column_may_contain_tabs() {
        let line = dump_line(
            "/books/OL6M",
            "{\"key\": \"/books/OL6M\", \"title\": \"Tab\tSeparated\"}",
        );
        assert_eq!(parse_line(&line).unwrap().title, "Tab\tSeparated");
    }

    #[test]
    fn ingest_file_streams_in_batches() {
        let dir = tempdir().unwrap();
        let dump = dir.path().join("dump.txt");
        let mut file = File::create(&dump).unwrap();
        for i in 0..7 {
            writeln!(
                file,
                "{}",
                dump_line(
                    &format!("/books/OL{i}M"),
                    &format!(r#"{{"key": "/books/OL{i}M", "title": "Book {i}"}}"#),
                )
            )
            .unwrap();
        }
        writeln!(file, "garbage line").unwrap();
        drop(file);

        let mut db = Database::open_in_memory().unwrap();
        // batch size smaller than the row count forces multiple flushes
        let total = ingest_file(&mut db, &dump, 3).unwrap();
        assert_eq!(total, 7);
        assert_eq!(db.count().unwrap(), 7);
    }
}
