//! tome - OpenLibrary topic search
//!
//! Retrieves book metadata from the OpenLibrary editions dump, stores it in a
//! local SQLite database, and answers topic queries against the stored
//! subject strings.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod matching;
pub mod openlibrary;
pub mod storage;

pub use error::{Result, TomeError};
