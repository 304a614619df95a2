use super::RecordKind;
use std::io;
use thiserror::Error;

/// Failure of a single field primitive, before record context is attached.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("field exceeds {limit} bytes")]
    TooLong { limit: usize },

    #[error("integer does not fit in 32 bits")]
    Overflow,
}

/// Fatal conditions encountered while parsing a source file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{kind} record {id}: more than {expected} fields")]
    TooManyFields { kind: RecordKind, id: u32, expected: usize },

    #[error("{kind} record {id}: field '{field}' exceeds {limit} bytes")]
    FieldTooLong {
        kind: RecordKind,
        id: u32,
        field: &'static str,
        limit: usize,
    },

    /// An id-typed field past `u32::MAX`.
    ///
    /// `id` is the failing record's leading id, absent when that id is the one that overflowed.
    /// `last_id` is the leading id of the last record parsed successfully before it.
    #[error(
        "{kind} record {}: integer field '{field}' does not fit in 32 bits (last parsed id: {})",
        display_id(.id, "?"),
        display_id(.last_id, "none")
    )]
    IntegerOverflow {
        kind: RecordKind,
        field: &'static str,
        id: Option<u32>,
        last_id: Option<u32>,
    },
}

fn display_id(id: &Option<u32>, missing: &str) -> String {
    id.map_or_else(|| missing.to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_message_names_both_ids() {
        let err = ParseError::IntegerOverflow {
            kind: RecordKind::PaperAuthor,
            field: "author_id",
            id: Some(20),
            last_id: Some(10),
        };
        assert_eq!(
            err.to_string(),
            "PaperAuthor record 20: integer field 'author_id' does not fit in 32 bits (last parsed id: 10)"
        );
    }

    #[test]
    fn test_overflow_message_without_ids() {
        let err = ParseError::IntegerOverflow {
            kind: RecordKind::Author,
            field: "id",
            id: None,
            last_id: None,
        };
        assert_eq!(
            err.to_string(),
            "Author record ?: integer field 'id' does not fit in 32 bits (last parsed id: none)"
        );
    }
}
