//! OpenLibrary works API access.

pub mod client;

pub use client::DetailClient;
