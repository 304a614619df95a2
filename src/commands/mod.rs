//! Command-line interface for bibdb
//!
//! Every command loads the database from a data directory, runs one query against it
//! and prints the result. Output goes through a [`Host`] so tests can capture it.
//!
//! ## Commands
//!
//! - **summary**: Print the number of rows held by each table
//! - **author**, **paper**, **conference**, **journal**: Print one row as JSON
//! - **links**: Print paper-author links of a paper, of an author, or of both, as JSON lines
//!
//! Loading is tuned by an optional `bibdb.toml` configuration file; see [`crate::config`].

mod common;
mod host;
mod links;
mod lookup;
mod run;
mod summary;

pub use common::{CommonArgs, LogLevel};
pub use host::Host;
pub use links::{LinksArgs, print_links};
pub use lookup::{LookupArgs, LookupKind, print_row};
pub use run::run;
pub use summary::print_summary;
