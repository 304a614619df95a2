use super::{ConferenceId, FieldSpec, JournalId, PaperId, RawRecord, RecordKind, RecordLayout, Row};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRow {
    pub id: PaperId,
    pub title: String,

    /// Publication year, 0 when the source leaves it blank or its digits overflow 32 bits.
    pub year: u32,

    pub conference_id: Option<ConferenceId>,
    pub journal_id: Option<JournalId>,
    pub keywords: String,
}

impl Row for PaperRow {
    type Key = PaperId;

    const LAYOUT: RecordLayout = RecordLayout::new(
        RecordKind::Paper,
        &[
            FieldSpec::id("id"),
            FieldSpec::text("title"),
            FieldSpec::number("year"),
            FieldSpec::number("conference_id"),
            FieldSpec::number("journal_id"),
            FieldSpec::text("keywords"),
        ],
    );

    fn from_record(record: RawRecord) -> Self {
        let mut fields = record.into_fields();
        Self {
            id: PaperId(fields.int()),
            title: fields.text(),
            year: fields.int(),
            conference_id: non_zero(fields.int()).map(ConferenceId),
            journal_id: non_zero(fields.int()).map(JournalId),
            keywords: fields.text(),
        }
    }

    fn key(&self) -> PaperId {
        self.id
    }
}

const fn non_zero(value: u32) -> Option<u32> {
    if value == 0 { None } else { Some(value) }
}
