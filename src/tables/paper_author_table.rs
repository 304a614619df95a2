//! Paper-author links and the by-author secondary index over them.
//!
//! The primary array is sorted by paper id, so all links of one paper are contiguous
//! and can be found with a binary search followed by a scan over the run.
//!
//! Looking links up by author uses a second array holding one [`PaperAuthorIndex`]
//! entry per link: the link's author id plus the link's position in the primary array.
//! The entries are sorted by author id, so the same binary search and scan technique
//! applies; each hit is then dereferenced into the primary array. Positions are plain
//! integers, never references, and stay valid because the primary array is final
//! before the index is built.

use super::search::equal_range_by_key;
use super::{AuthorId, FieldSpec, LoadOptions, PaperId, RawRecord, RecordKind, RecordLayout, Row, Table, TableIndex};
use crate::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperAuthorRow {
    pub paper_id: PaperId,
    pub author_id: AuthorId,

    /// Author name as printed on the paper.
    pub name: String,

    /// Affiliation as printed on the paper.
    pub affiliation: String,
}

impl Row for PaperAuthorRow {
    type Key = PaperId;

    const LAYOUT: RecordLayout = RecordLayout::new(
        RecordKind::PaperAuthor,
        &[
            FieldSpec::id("paper_id"),
            FieldSpec::id("author_id"),
            FieldSpec::text("name"),
            FieldSpec::text("affiliation"),
        ],
    );

    const SHARED_KEYS: bool = true;

    fn from_record(record: RawRecord) -> Self {
        let mut fields = record.into_fields();
        Self {
            paper_id: PaperId(fields.int()),
            author_id: AuthorId(fields.int()),
            name: fields.text(),
            affiliation: fields.text(),
        }
    }

    fn key(&self) -> PaperId {
        self.paper_id
    }
}

/// Secondary index entry: where the links of one author live in the primary array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaperAuthorIndex {
    pub author_id: AuthorId,
    pub position: TableIndex,
}

/// Paper-author links, searchable by paper id and by author id.
#[derive(Debug, Clone, Default)]
pub struct PaperAuthorTable {
    links: Table<PaperAuthorRow>,
    by_author: Vec<PaperAuthorIndex>,
}

impl PaperAuthorTable {
    /// Builds the by-author index over an already sorted link table.
    #[must_use]
    pub fn new(links: Table<PaperAuthorRow>) -> Self {
        let mut by_author: Vec<PaperAuthorIndex> = links
            .iter()
            .enumerate()
            .map(|(position, link)| PaperAuthorIndex {
                author_id: link.author_id,
                position: TableIndex::from(position),
            })
            .collect();

        by_author.sort_by_key(|entry| entry.author_id);

        Self { links, by_author }
    }

    pub fn load(data_root: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        Ok(Self::new(Table::load(data_root, options)?))
    }

    #[must_use]
    pub const fn links(&self) -> &Table<PaperAuthorRow> {
        &self.links
    }

    #[must_use]
    pub fn author_index(&self) -> &[PaperAuthorIndex] {
        &self.by_author
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All links of `paper_id`. Their relative order is unspecified.
    #[must_use]
    pub fn by_paper(&self, paper_id: PaperId) -> &[PaperAuthorRow] {
        self.links.equal_range(paper_id)
    }

    /// All links of `author_id`, sorted by paper id.
    #[must_use]
    pub fn by_author(&self, author_id: AuthorId) -> Vec<&PaperAuthorRow> {
        let range = equal_range_by_key(&self.by_author, &author_id, |entry| entry.author_id);

        let mut result: Vec<&PaperAuthorRow> = self.by_author[range].iter().map(|entry| self.links.get(entry.position)).collect();
        result.sort_by_key(|link| link.paper_id);
        result
    }

    /// Links joining `paper_id` and `author_id`, usually zero or one.
    #[must_use]
    pub fn by_paper_and_author(&self, paper_id: PaperId, author_id: AuthorId) -> Vec<&PaperAuthorRow> {
        self.by_paper(paper_id).iter().filter(|link| link.author_id == author_id).collect()
    }
}
