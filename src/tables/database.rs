use super::cluster::load_clusters;
use super::{
    AuthorId, AuthorRow, ConferenceId, ConferenceRow, JournalId, JournalRow, LoadOptions, PaperAuthorRow, PaperAuthorTable, PaperId,
    PaperRow, RecordKind, Row, Table,
};
use crate::Result;
use std::path::Path;
use std::time::Instant;

const LOG_TARGET: &str = "tables";

/// Generates the `Database` struct, one accessor per table, and one point lookup per table.
///
/// Each entry reads `field: RowType => singular`, which yields:
/// - a `field: Table<RowType>` member and a `field()` accessor
/// - a `singular_by_id()` lookup keyed by the row's id type
///
/// The paper-author links are not listed here since they carry their own secondary index.
macro_rules! define_tables {
    ($(
        $(#[$meta:meta])*
        $field:ident: $row:ty => $singular:ident
    ),* $(,)?) => {
        /// All tables of one data directory, fully loaded and indexed.
        #[derive(Debug, Clone, Default)]
        pub struct Database {
            $(
                $(#[$meta])*
                $field: Table<$row>,
            )*
            paper_authors: PaperAuthorTable,
        }

        impl Database {
            $(
                #[must_use]
                pub const fn $field(&self) -> &Table<$row> {
                    &self.$field
                }

                pastey::paste! {
                    #[doc = concat!("Looks up one `", stringify!($row), "` by id.")]
                    #[must_use]
                    pub fn [<$singular _by_id>](&self, id: <$row as Row>::Key) -> Option<&$row> {
                        self.$field.find(id)
                    }
                }
            )*

            /// Number of rows held by each table.
            #[must_use]
            pub fn row_counts(&self) -> Vec<(RecordKind, usize)> {
                vec![
                    $((<$row as Row>::LAYOUT.kind, self.$field.len()),)*
                    (RecordKind::PaperAuthor, self.paper_authors.len()),
                ]
            }
        }
    };
}

define_tables! {
    conferences: ConferenceRow => conference,
    journals: JournalRow => journal,
    authors: AuthorRow => author,
    papers: PaperRow => paper,
}

impl Database {
    /// Assembles a database from tables that are already sorted.
    #[must_use]
    pub fn new(
        conferences: Table<ConferenceRow>,
        journals: Table<JournalRow>,
        authors: Table<AuthorRow>,
        papers: Table<PaperRow>,
        paper_authors: PaperAuthorTable,
    ) -> Self {
        Self {
            conferences,
            journals,
            authors,
            papers,
            paper_authors,
        }
    }

    /// Loads every source file found in `data_root`.
    ///
    /// Venues are loaded and annotated with their clusters first, followed by authors,
    /// papers and finally the paper-author links. Any fatal error aborts the whole load.
    pub fn load(data_root: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let data_root = data_root.as_ref();
        let start = Instant::now();
        log::info!(target: LOG_TARGET, "Loading database from '{}'", data_root.display());

        let mut conferences = Table::load(data_root, options)?;
        let _ = load_clusters(data_root, RecordKind::ConferenceCluster, &mut conferences, options)?;

        let mut journals = Table::load(data_root, options)?;
        let _ = load_clusters(data_root, RecordKind::JournalCluster, &mut journals, options)?;

        let authors = Table::load(data_root, options)?;
        let papers = Table::load(data_root, options)?;
        let paper_authors = PaperAuthorTable::load(data_root, options)?;

        log::info!(
            target: LOG_TARGET,
            "Finished loading database from '{}' in {:.3}s",
            data_root.display(),
            start.elapsed().as_secs_f64()
        );

        Ok(Self::new(conferences, journals, authors, papers, paper_authors))
    }

    #[must_use]
    pub const fn paper_authors(&self) -> &PaperAuthorTable {
        &self.paper_authors
    }

    /// All paper-author links of one paper.
    #[must_use]
    pub fn paper_authors_by_paper_id(&self, paper_id: PaperId) -> &[PaperAuthorRow] {
        self.paper_authors.by_paper(paper_id)
    }

    /// All paper-author links of one author, sorted by paper id.
    #[must_use]
    pub fn paper_authors_by_author_id(&self, author_id: AuthorId) -> Vec<&PaperAuthorRow> {
        self.paper_authors.by_author(author_id)
    }

    /// The links joining one paper and one author.
    #[must_use]
    pub fn paper_authors_by_id(&self, paper_id: PaperId, author_id: AuthorId) -> Vec<&PaperAuthorRow> {
        self.paper_authors.by_paper_and_author(paper_id, author_id)
    }

    /// The conference of a paper, if it names one that exists.
    #[must_use]
    pub fn conference_of(&self, paper: &PaperRow) -> Option<&ConferenceRow> {
        paper.conference_id.and_then(|id: ConferenceId| self.conference_by_id(id))
    }

    /// The journal of a paper, if it names one that exists.
    #[must_use]
    pub fn journal_of(&self, paper: &PaperRow) -> Option<&JournalRow> {
        paper.journal_id.and_then(|id: JournalId| self.journal_by_id(id))
    }
}
