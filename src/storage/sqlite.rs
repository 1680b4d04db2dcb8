//! SQLite database layer

use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One processed bibliographic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique identifier, e.g. `/books/OL1000000M`.
    pub key: String,
    pub title: String,
    /// Comma-joined free-text subjects; may be empty.
    pub subjects: String,
}

/// SQLite database wrapper for the book catalog
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        Self::configure_pragmas(&conn)?;
        Self::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Open an in-memory database (tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Get a reference to the connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }

    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS books (
                 key      TEXT PRIMARY KEY,
                 title    TEXT NOT NULL,
                 subjects TEXT NOT NULL DEFAULT ''
             );",
        )?;
        Ok(())
    }

    /// Drop all stored books and reload from the iterator in one transaction.
    ///
    /// A refresh replaces the catalog wholesale; records stream through a
    /// prepared statement without being accumulated first.
    pub fn replace_all<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = BookRecord>,
    {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM books", [])?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO books (key, title, subjects) VALUES (?1, ?2, ?3)",
            )?;
            for record in records {
                stmt.execute(params![record.key, record.title, record.subjects])?;
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Append a parsed chunk inside a single transaction.
    pub fn insert_batch(&mut self, records: &[BookRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO books (key, title, subjects) VALUES (?1, ?2, ?3)",
            )?;
            for record in records {
                stmt.execute(params![record.key, record.title, record.subjects])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Remove every stored book.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM books", [])?;
        Ok(())
    }

    /// Fetch every stored record. No filter pushdown; topic filtering happens
    /// in-process via the matcher.
    pub fn fetch_all(&self) -> Result<Vec<BookRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, title, subjects FROM books ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok(BookRecord {
                key: row.get(0)?,
                title: row.get(1)?,
                subjects: row.get(2)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Number of stored books.
    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count)
    }
}
