use super::{ConferenceId, FieldSpec, JournalId, RawRecord, RecordKind, RecordLayout, Row};
use serde::Serialize;

/// A conference or a journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueRow<I> {
    pub id: I,
    pub short_name: String,
    pub full_name: String,
    pub homepage: String,

    /// Cluster assigned by the cluster file, 0 until then.
    pub cluster: u32,
}

pub type ConferenceRow = VenueRow<ConferenceId>;
pub type JournalRow = VenueRow<JournalId>;

const VENUE_FIELDS: &[FieldSpec] = &[
    FieldSpec::id("id"),
    FieldSpec::text("short_name"),
    FieldSpec::text("full_name"),
    FieldSpec::text("homepage"),
];

macro_rules! impl_venue_row {
    ($id:ident, $kind:expr) => {
        impl Row for VenueRow<$id> {
            type Key = $id;

            const LAYOUT: RecordLayout = RecordLayout::new($kind, VENUE_FIELDS);

            fn from_record(record: RawRecord) -> Self {
                let mut fields = record.into_fields();
                Self {
                    id: $id(fields.int()),
                    short_name: fields.text(),
                    full_name: fields.text(),
                    homepage: fields.text(),
                    cluster: 0,
                }
            }

            fn key(&self) -> $id {
                self.id
            }
        }
    };
}

impl_venue_row!(ConferenceId, RecordKind::Conference);
impl_venue_row!(JournalId, RecordKind::Journal);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{LoadOptions, Table};
    use std::io::Cursor;

    #[test]
    fn test_parse_journal() {
        let csv = "Id,ShortName,FullName,HomePage\n3,\"TKDE\",\"Knowledge, Data Engineering\",\"http://x.org/a?b=1\"\n1,,\"\",\n";
        let table: Table<JournalRow> = Table::read_from(Cursor::new(csv), &LoadOptions::default()).unwrap();

        assert_eq!(table.len(), 2);
        let tkde = table.find(JournalId(3)).unwrap();
        assert_eq!(tkde.short_name, "TKDE");
        assert_eq!(tkde.full_name, "Knowledge, Data Engineering");
        assert_eq!(tkde.homepage, "http://x.org/a?b=1");
        assert_eq!(tkde.cluster, 0);

        let blank = table.find(JournalId(1)).unwrap();
        assert!(blank.short_name.is_empty() && blank.full_name.is_empty() && blank.homepage.is_empty());
    }
}
