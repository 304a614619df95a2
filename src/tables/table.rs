use super::search::{equal_range_by_key, find_by_key};
use super::{FieldTokenizer, LoadOptions, ParseError, RawRecord, RecordLayout, TableIndex};
use crate::Result;
use core::fmt::{Debug, Display};
use ohno::IntoAppError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

const LOG_TARGET: &str = "tables";

/// A record kind that can be parsed from its source file and stored in a [`Table`].
pub trait Row: Sized {
    type Key: Copy + Ord + Debug + Display;

    const LAYOUT: RecordLayout;

    /// Whether several rows may legitimately carry the same key.
    ///
    /// Tables of rows with unique keys keep only the first row seen for each key.
    const SHARED_KEYS: bool = false;

    fn from_record(record: RawRecord) -> Self;
    fn key(&self) -> Self::Key;
}

/// Primary array of one record kind, sorted ascending by key.
#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Row> Table<R> {
    /// Builds a table by sorting `rows` by key.
    ///
    /// The sort is stable, so among rows sharing a key the first one in input order wins
    /// when duplicates are dropped.
    #[must_use]
    pub fn from_rows(mut rows: Vec<R>) -> Self {
        rows.sort_by_key(R::key);

        if !R::SHARED_KEYS {
            let before = rows.len();
            rows.dedup_by_key(|row| row.key());
            let dropped = before - rows.len();
            if dropped > 0 {
                log::warn!(target: LOG_TARGET, "dropped {dropped} {} row(s) with duplicate ids", R::LAYOUT.kind);
            }
        }

        Self { rows }
    }

    /// Parses a complete source file, header line included.
    pub fn read_from(reader: impl Read, options: &LoadOptions) -> Result<Self, ParseError> {
        let mut tokenizer = FieldTokenizer::new(reader, options);
        tokenizer.skip_header()?;

        let mut rows = Vec::new();
        while let Some(record) = tokenizer.read_record(&R::LAYOUT)? {
            rows.push(R::from_record(record));
        }

        Ok(Self::from_rows(rows))
    }

    /// Opens and parses this kind's source file inside `data_root`.
    pub fn load(data_root: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = data_root.as_ref().join(R::LAYOUT.kind.csv_name());
        let start = Instant::now();
        log::info!(target: LOG_TARGET, "Loading '{}'", path.display());

        let file = File::open(&path).into_app_err_with(|| format!("unable to open {}", path.display()))?;
        let table = Self::read_from(file, options).into_app_err_with(|| format!("unable to parse {}", path.display()))?;

        log::info!(
            target: LOG_TARGET,
            "Finished loading '{}' ({} rows) in {:.3}s",
            path.display(),
            table.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(table)
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, as handed out by [`Self::position`].
    #[must_use]
    pub fn get(&self, index: TableIndex) -> &R {
        &self.rows[index.get()]
    }

    #[must_use]
    pub fn position(&self, key: R::Key) -> Option<TableIndex> {
        find_by_key(&self.rows, &key, R::key).map(TableIndex::from)
    }

    /// Point lookup by key.
    #[must_use]
    pub fn find(&self, key: R::Key) -> Option<&R> {
        self.position(key).map(|index| self.get(index))
    }

    /// All rows carrying `key`, in their stored order.
    #[must_use]
    pub fn equal_range(&self, key: R::Key) -> &[R] {
        &self.rows[equal_range_by_key(&self.rows, &key, R::key)]
    }

    /// Mutable point lookup, reserved for the load phase.
    ///
    /// Callers must not change the key of the returned row.
    pub(crate) fn find_mut(&mut self, key: R::Key) -> Option<&mut R> {
        let index = self.position(key)?;
        Some(&mut self.rows[index.get()])
    }
}
