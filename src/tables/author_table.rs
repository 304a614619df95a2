use super::{AuthorId, FieldSpec, RawRecord, RecordKind, RecordLayout, Row};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRow {
    pub id: AuthorId,
    pub name: String,
    pub affiliation: String,
}

impl Row for AuthorRow {
    type Key = AuthorId;

    const LAYOUT: RecordLayout = RecordLayout::new(
        RecordKind::Author,
        &[FieldSpec::id("id"), FieldSpec::text("name"), FieldSpec::text("affiliation")],
    );

    fn from_record(record: RawRecord) -> Self {
        let mut fields = record.into_fields();
        Self {
            id: AuthorId(fields.int()),
            name: fields.text(),
            affiliation: fields.text(),
        }
    }

    fn key(&self) -> AuthorId {
        self.id
    }
}
