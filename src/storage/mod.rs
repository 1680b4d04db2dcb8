//! Storage layer for tome.
//!
//! A single SQLite database holds the processed book records; queries read
//! the whole table and filter in-process through the matcher.

pub mod sqlite;

pub use sqlite::{BookRecord, Database};
