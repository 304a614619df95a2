//! In-memory bibliographic tables loaded from comma-delimited source files.
//!
//! The main entry point is [`Database`], which loads every table of a data directory
//! and answers point lookups by id plus paper-author association lookups.
//!
//! # Architecture Overview
//!
//! Loading is layered bottom-up:
//!
//! - [`ByteReader`] pulls bytes from a file through a fixed-capacity buffer, refilling on
//!   demand and reporting end of stream exactly once it is reached.
//! - [`FieldTokenizer`] turns bytes into fields. It is driven by a [`RecordLayout`], the
//!   ordered list of fields of one record kind, so every kind shares the same state machine.
//! - Each record kind implements [`Row`], which names its layout and converts a
//!   [`RawRecord`] into a typed row.
//! - [`Table`] owns the rows of one kind in a `Vec` sorted ascending by id. Lookups are binary
//!   searches; ranges of equal keys are found by searching for any match and widening.
//! - [`PaperAuthorTable`] adds a second array over the paper-author links, sorted by author id
//!   and holding positions into the primary array.
//! - The cluster files only annotate venues that are already loaded; see [`ClusterReader`].
//!
//! # Source Format
//!
//! Each file starts with a header line that is skipped. Records end at `\n`, fields end at `,`,
//! and a `"` toggles a quoted section in which both are plain data. Quotes are never part of a
//! value. Only printable ASCII is kept in text values. Numeric fields keep the digits they
//! contain and ignore everything else.
//!
//! ```text
//! Id,Name,Affiliation
//! 1,"Smith, John","MIT"
//! 2,Jane Doe,
//! ```
//!
//! After [`Database::load`] returns, the database is read-only and may be shared freely.

mod author_table;
mod byte_reader;
mod cluster;
mod database;
mod error;
mod ids;
mod load_options;
mod paper_author_table;
mod paper_table;
mod record_kind;
mod search;
mod table;
mod tokenizer;
mod venue_table;

pub use author_table::AuthorRow;
pub use byte_reader::{ByteReader, DEFAULT_BUFFER_SIZE};
pub use cluster::{ClusterPair, ClusterReader, ClusterStats, apply_clusters, load_clusters};
pub use database::Database;
pub use error::{FieldError, ParseError};
pub use ids::{AuthorId, ConferenceId, JournalId, PaperId, TableIndex};
pub use load_options::{DEFAULT_MAX_FIELD_LEN, LoadOptions};
pub use paper_author_table::{PaperAuthorIndex, PaperAuthorRow, PaperAuthorTable};
pub use paper_table::PaperRow;
pub use record_kind::RecordKind;
pub use table::{Row, Table};
pub use tokenizer::{FieldEnd, FieldKind, FieldSpec, FieldTokenizer, FieldValue, Fields, IntField, RawRecord, RecordLayout};
pub use venue_table::{ConferenceRow, JournalRow, VenueRow};
