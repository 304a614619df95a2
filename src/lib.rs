//! bibdb crate
//!
//! Loads the author, paper, paper-author, conference and journal tables of a bibliographic
//! dump into memory and answers lookups by id and by paper-author association. See
//! [`tables::Database`] for the entry point.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod config;
pub mod tables;

pub use commands::{Host, run};
pub use tables::{Database, LoadOptions};
