//! Cluster annotation of conferences and journals.
//!
//! A cluster file holds `id,cluster` integer pairs after its header line. Each pair
//! assigns the cluster of an already loaded venue; ids with no matching venue are
//! counted and otherwise ignored.

use super::tokenizer::{FieldEnd, with_context};
use super::{FieldSpec, FieldTokenizer, LoadOptions, ParseError, RecordKind, Row, Table, VenueRow};
use crate::Result;
use ohno::IntoAppError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

const LOG_TARGET: &str = "tables";

const ID: FieldSpec = FieldSpec::id("id");
const CLUSTER: FieldSpec = FieldSpec::id("cluster");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterPair {
    pub id: u32,
    pub cluster: u32,
}

/// Outcome of applying a cluster file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterStats {
    /// Pairs whose id matched a venue.
    pub applied: usize,

    /// Pairs whose id matched nothing.
    pub dangling: usize,
}

/// Streams the pairs of one cluster file.
///
/// Extra columns after the cluster are ignored and lines holding a single integer are
/// skipped. The iterator stops for good after the first error.
#[derive(Debug)]
pub struct ClusterReader<R> {
    tokenizer: FieldTokenizer<R>,
    kind: RecordKind,
    started: bool,
    finished: bool,
    last_id: Option<u32>,
}

impl<R: Read> ClusterReader<R> {
    pub fn new(inner: R, kind: RecordKind, options: &LoadOptions) -> Self {
        Self {
            tokenizer: FieldTokenizer::new(inner, options),
            kind,
            started: false,
            finished: false,
            last_id: None,
        }
    }

    fn read_pair(&mut self) -> Result<Option<ClusterPair>, ParseError> {
        if !self.started {
            self.started = true;
            self.tokenizer.skip_header()?;
        }

        loop {
            let Some(id) = self.tokenizer.read_int_field().map_err(|e| with_context(e, self.kind, &ID, None, self.last_id))? else {
                return Ok(None);
            };

            match id.end {
                FieldEnd::Delimiter => {}
                FieldEnd::Terminator => {
                    if id.has_digits {
                        log::warn!(target: LOG_TARGET, "skipping {} line for id {}: no cluster", self.kind, id.value);
                    }
                    continue;
                }
                FieldEnd::EndOfStream => return Ok(None),
            }

            let Some(cluster) = self
                .tokenizer
                .read_int_field()
                .map_err(|e| with_context(e, self.kind, &CLUSTER, Some(id.value), self.last_id))?
            else {
                return Ok(None);
            };

            if cluster.end == FieldEnd::Delimiter {
                self.tokenizer
                    .skip_record()
                    .map_err(|e| with_context(e, self.kind, &CLUSTER, Some(id.value), self.last_id))?;
            }

            self.last_id = Some(id.value);
            return Ok(Some(ClusterPair {
                id: id.value,
                cluster: cluster.value,
            }));
        }
    }
}

impl<R: Read> Iterator for ClusterReader<R> {
    type Item = Result<ClusterPair, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.read_pair().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }
        result
    }
}

/// Sets the cluster of every venue named by `pairs`.
///
/// Later pairs for the same id overwrite earlier ones.
pub fn apply_clusters<I>(table: &mut Table<VenueRow<I>>, pairs: impl IntoIterator<Item = ClusterPair>) -> ClusterStats
where
    I: From<u32>,
    VenueRow<I>: Row<Key = I>,
{
    let mut stats = ClusterStats::default();

    for pair in pairs {
        if let Some(venue) = table.find_mut(I::from(pair.id)) {
            venue.cluster = pair.cluster;
            stats.applied += 1;
        } else {
            log::debug!(target: LOG_TARGET, "no venue with id {} for cluster {}", pair.id, pair.cluster);
            stats.dangling += 1;
        }
    }

    stats
}

/// Reads the cluster file of `kind` inside `data_root` and applies it to `table`.
pub fn load_clusters<I>(data_root: impl AsRef<Path>, kind: RecordKind, table: &mut Table<VenueRow<I>>, options: &LoadOptions) -> Result<ClusterStats>
where
    I: From<u32>,
    VenueRow<I>: Row<Key = I>,
{
    let path = data_root.as_ref().join(kind.csv_name());
    let start = Instant::now();
    log::info!(target: LOG_TARGET, "Loading '{}'", path.display());

    let file = File::open(&path).into_app_err_with(|| format!("unable to open {}", path.display()))?;
    let pairs = ClusterReader::new(file, kind, options)
        .collect::<Result<Vec<_>, _>>()
        .into_app_err_with(|| format!("unable to parse {}", path.display()))?;

    let stats = apply_clusters(table, pairs);

    log::info!(
        target: LOG_TARGET,
        "Finished loading '{}' ({} applied, {} dangling) in {:.3}s",
        path.display(),
        stats.applied,
        stats.dangling,
        start.elapsed().as_secs_f64()
    );

    Ok(stats)
}
