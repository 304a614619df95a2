//! Quote-aware field tokenizer for the comma-delimited source files.
//!
//! The tokenizer understands exactly three structural bytes:
//!
//! - `,` separates fields unless a quoted section is open
//! - `\n` terminates a record unless a quoted section is open
//! - `"` opens or closes a quoted section and is never part of a value
//!
//! Text values keep printable ASCII only (32..=126). Every other byte, including
//! a quoted newline or a carriage return, is dropped. There is no escaping.
//!
//! Integer-typed fields ignore non-digit bytes and accumulate whatever digits they
//! contain, and a field without digits is 0. Past `u32::MAX`, a bare id field is an
//! error while a quoted number field such as a year reads as 0.

use super::byte_reader::ByteReader;
use super::{FieldError, LoadOptions, ParseError, RecordKind};
use std::io::{self, Read};
use std::vec;

const LOG_TARGET: &str = "tables";

const DELIMITER: u8 = b',';
const TERMINATOR: u8 = b'\n';
const QUOTE: u8 = b'"';

#[inline]
const fn is_printable(byte: u8) -> bool {
    matches!(byte, 32..=126)
}

/// How a field came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEnd {
    Delimiter,
    Terminator,
    EndOfStream,
}

/// Result of reading a bare integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntField {
    pub value: u32,
    pub has_digits: bool,
    pub end: FieldEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Bare integer read with no quote handling; only valid as a leading field.
    Id,

    /// Quote-aware free text.
    Text,

    /// Quote-aware text reduced to the digits it contains.
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    #[must_use]
    pub const fn id(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Id }
    }

    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }

    #[must_use]
    pub const fn number(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Number }
    }
}

/// Ordered field layout of one record kind.
///
/// The first field is always an [`FieldKind::Id`] and ids only appear as a leading run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub kind: RecordKind,
    pub fields: &'static [FieldSpec],
}

impl RecordLayout {
    #[must_use]
    pub const fn new(kind: RecordKind, fields: &'static [FieldSpec]) -> Self {
        assert!(!fields.is_empty(), "a record layout needs at least one field");
        assert!(matches!(fields[0].kind, FieldKind::Id), "a record layout must start with an id field");

        let mut i = 1;
        while i < fields.len() {
            if matches!(fields[i].kind, FieldKind::Id) {
                assert!(matches!(fields[i - 1].kind, FieldKind::Id), "id fields must form a leading run");
            }
            i += 1;
        }

        Self { kind, fields }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(u32),
    Text(String),
}

impl FieldKind {
    const fn default_value(self) -> FieldValue {
        match self {
            Self::Id | Self::Number => FieldValue::Int(0),
            Self::Text => FieldValue::Text(String::new()),
        }
    }
}

/// One record as produced by [`FieldTokenizer::read_record`], one value per layout field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    values: Vec<FieldValue>,
}

impl RawRecord {
    /// A record holding the default value of every field in `layout`.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn defaults(layout: &RecordLayout) -> Self {
        Self {
            values: layout.fields.iter().map(|spec| spec.kind.default_value()).collect(),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    #[must_use]
    pub fn into_fields(self) -> Fields {
        Fields {
            inner: self.values.into_iter(),
        }
    }
}

/// Consumes the values of a [`RawRecord`] in layout order.
#[derive(Debug)]
pub struct Fields {
    inner: vec::IntoIter<FieldValue>,
}

impl Fields {
    pub fn int(&mut self) -> u32 {
        match self.inner.next() {
            Some(FieldValue::Int(value)) => value,
            other => unreachable!("record layout promised an integer field, found {other:?}"),
        }
    }

    pub fn text(&mut self) -> String {
        match self.inner.next() {
            Some(FieldValue::Text(value)) => value,
            other => unreachable!("record layout promised a text field, found {other:?}"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    value: u32,
    has_digits: bool,
}

impl Accumulator {
    #[inline]
    fn push(&mut self, byte: u8) -> Result<(), FieldError> {
        if byte.is_ascii_digit() {
            self.value = self
                .value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(byte - b'0')))
                .ok_or(FieldError::Overflow)?;
            self.has_digits = true;
        }
        Ok(())
    }
}

/// Drives a [`ByteReader`] through the fields of the source files.
#[derive(Debug)]
pub struct FieldTokenizer<R> {
    reader: ByteReader<R>,
    max_field_len: usize,
    last_id: Option<u32>,
}

impl<R: Read> FieldTokenizer<R> {
    pub fn new(inner: R, options: &LoadOptions) -> Self {
        Self {
            reader: ByteReader::with_capacity(inner, options.buffer_size),
            max_field_len: options.max_field_len,
            last_id: None,
        }
    }

    /// Skips the header line.
    pub fn skip_header(&mut self) -> io::Result<()> {
        self.reader.skip_line()
    }

    /// Leading id of the most recent record returned by [`Self::read_record`].
    #[must_use]
    pub const fn last_id(&self) -> Option<u32> {
        self.last_id
    }

    /// Reads a bare integer field.
    ///
    /// Returns `None` when the stream is already exhausted, which marks the end of the input
    /// rather than a malformed record.
    pub fn read_int_field(&mut self) -> Result<Option<IntField>, FieldError> {
        let mut next = self.reader.next()?;
        if next.is_none() {
            return Ok(None);
        }

        let mut acc = Accumulator::default();
        let end = loop {
            match next {
                None => break FieldEnd::EndOfStream,
                Some(DELIMITER) => break FieldEnd::Delimiter,
                Some(TERMINATOR) => break FieldEnd::Terminator,
                Some(byte) => acc.push(byte)?,
            }
            next = self.reader.next()?;
        };

        Ok(Some(IntField {
            value: acc.value,
            has_digits: acc.has_digits,
            end,
        }))
    }

    /// Reads a quote-aware text field into `out`, replacing its previous contents.
    pub fn read_text_field(&mut self, out: &mut String) -> Result<FieldEnd, FieldError> {
        out.clear();
        let limit = self.max_field_len;
        self.scan(|byte| {
            if out.len() >= limit {
                return Err(FieldError::TooLong { limit });
            }
            out.push(char::from(byte));
            Ok(())
        })
    }

    /// Reads a quote-aware field and keeps only the digits it contains.
    ///
    /// Digits past `u32::MAX` are consumed with the rest of the field and the value is 0.
    pub fn read_number_field(&mut self) -> Result<(u32, FieldEnd), FieldError> {
        let mut acc = Accumulator::default();
        let mut overflowed = false;
        let end = self.scan(|byte| {
            if !overflowed && acc.push(byte).is_err() {
                overflowed = true;
            }
            Ok(())
        })?;

        if overflowed {
            log::debug!(target: LOG_TARGET, "number field past 32 bits read as 0");
            return Ok((0, end));
        }

        Ok((acc.value, end))
    }

    /// Discards the rest of the current record.
    pub fn skip_record(&mut self) -> Result<(), FieldError> {
        while self.scan(|_| Ok(()))? == FieldEnd::Delimiter {}
        Ok(())
    }

    fn scan(&mut self, mut sink: impl FnMut(u8) -> Result<(), FieldError>) -> Result<FieldEnd, FieldError> {
        let mut quoted = false;
        loop {
            match self.reader.next()? {
                None => return Ok(FieldEnd::EndOfStream),
                Some(QUOTE) => quoted = !quoted,
                Some(DELIMITER) if !quoted => return Ok(FieldEnd::Delimiter),
                Some(TERMINATOR) if !quoted => return Ok(FieldEnd::Terminator),
                Some(byte) if is_printable(byte) => sink(byte)?,
                Some(_) => {}
            }
        }
    }

    /// Reads the next record shaped by `layout`.
    ///
    /// Returns `Ok(None)` once the input is exhausted. Blank lines are skipped, as are lines
    /// that end before all their leading ids were read. A line that ends early keeps default
    /// values for its missing trailing fields, while a record cut short by the end of the
    /// stream is discarded.
    pub fn read_record(&mut self, layout: &RecordLayout) -> Result<Option<RawRecord>, ParseError> {
        let kind = layout.kind;
        let count = layout.fields.len();

        'record: loop {
            let last_id = self.last_id;
            let mut values = Vec::with_capacity(count);
            let mut record_id = None;

            for (index, spec) in layout.fields.iter().enumerate() {
                let is_last = index + 1 == count;

                let (value, end) = match spec.kind {
                    FieldKind::Id => {
                        let field = self
                            .read_int_field()
                            .map_err(|e| with_context(e, kind, spec, record_id, last_id))?;

                        let Some(field) = field else {
                            if index > 0 {
                                log::debug!(target: LOG_TARGET, "{kind} input ends inside record {}", record_id.unwrap_or_default());
                            }
                            return Ok(None);
                        };

                        if field.end == FieldEnd::Terminator && !is_last {
                            if index > 0 || field.has_digits {
                                log::warn!(
                                    target: LOG_TARGET,
                                    "skipping {kind} record {}: line ends before field '{}'",
                                    record_id.unwrap_or(field.value),
                                    layout.fields[index + 1].name
                                );
                            }
                            continue 'record;
                        }

                        if index == 0 {
                            record_id = Some(field.value);
                        }

                        (FieldValue::Int(field.value), field.end)
                    }

                    FieldKind::Text => {
                        let mut text = String::new();
                        let end = self
                            .read_text_field(&mut text)
                            .map_err(|e| with_context(e, kind, spec, record_id, last_id))?;
                        (FieldValue::Text(text), end)
                    }

                    FieldKind::Number => {
                        let (number, end) = self
                            .read_number_field()
                            .map_err(|e| with_context(e, kind, spec, record_id, last_id))?;
                        (FieldValue::Int(number), end)
                    }
                };

                values.push(value);

                match end {
                    FieldEnd::Delimiter if is_last => {
                        return Err(ParseError::TooManyFields {
                            kind,
                            id: record_id.unwrap_or_default(),
                            expected: count,
                        });
                    }
                    FieldEnd::Delimiter => {}
                    FieldEnd::Terminator => {
                        values.extend(layout.fields[index + 1..].iter().map(|spec| spec.kind.default_value()));
                        break;
                    }
                    FieldEnd::EndOfStream if is_last => break,
                    FieldEnd::EndOfStream => {
                        log::debug!(
                            target: LOG_TARGET,
                            "discarding truncated {kind} record {} at end of input",
                            record_id.unwrap_or_default()
                        );
                        return Ok(None);
                    }
                }
            }

            if record_id.is_some() {
                self.last_id = record_id;
            }

            return Ok(Some(RawRecord { values }));
        }
    }
}

/// Attaches record context to a field failure.
///
/// `id` is the leading id of the record being read, `last_id` that of the last record read in full.
pub(super) fn with_context(error: FieldError, kind: RecordKind, spec: &FieldSpec, id: Option<u32>, last_id: Option<u32>) -> ParseError {
    match error {
        FieldError::Io(e) => ParseError::Io(e),
        FieldError::TooLong { limit } => ParseError::FieldTooLong {
            kind,
            id: id.unwrap_or_default(),
            field: spec.name,
            limit,
        },
        FieldError::Overflow => ParseError::IntegerOverflow {
            kind,
            field: spec.name,
            id,
            last_id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const PAIR: RecordLayout = RecordLayout::new(
        RecordKind::Author,
        &[FieldSpec::id("id"), FieldSpec::text("name"), FieldSpec::text("affiliation")],
    );

    const MIXED: RecordLayout = RecordLayout::new(
        RecordKind::Paper,
        &[FieldSpec::id("id"), FieldSpec::text("title"), FieldSpec::number("year")],
    );

    const LINK: RecordLayout = RecordLayout::new(
        RecordKind::PaperAuthor,
        &[FieldSpec::id("paper_id"), FieldSpec::id("author_id"), FieldSpec::text("name")],
    );

    fn tokenizer(input: &[u8]) -> FieldTokenizer<Cursor<Vec<u8>>> {
        FieldTokenizer::new(Cursor::new(input.to_vec()), &LoadOptions::default())
    }

    fn text(input: &[u8]) -> (String, FieldEnd) {
        let mut tok = tokenizer(input);
        let mut out = String::new();
        let end = tok.read_text_field(&mut out).unwrap();
        (out, end)
    }

    fn texts(record: &RawRecord) -> Vec<&str> {
        record
            .values()
            .iter()
            .filter_map(|v| match v {
                FieldValue::Text(s) => Some(s.as_str()),
                FieldValue::Int(_) => None,
            })
            .collect()
    }

    fn read_all(input: &[u8], layout: &RecordLayout) -> Vec<RawRecord> {
        let mut tok = tokenizer(input);
        let mut records = Vec::new();
        while let Some(record) = tok.read_record(layout).unwrap() {
            records.push(record);
        }
        records
    }

    #[test]
    fn test_quoted_delimiter_is_literal() {
        assert_eq!(text(b"\"Smith, John\",next"), ("Smith, John".to_string(), FieldEnd::Delimiter));
    }

    #[test]
    fn test_unquoted_printables_pass_through() {
        assert_eq!(text(b"O''Brien\n"), ("O''Brien".to_string(), FieldEnd::Terminator));
    }

    #[test]
    fn test_quote_toggles_mid_field() {
        assert_eq!(text(b"ab\"c,d\"e,f"), ("abc,de".to_string(), FieldEnd::Delimiter));
    }

    #[test]
    fn test_non_printable_bytes_are_dropped() {
        assert_eq!(text(b"a\tb\x7fc\x01\r\n"), ("abc".to_string(), FieldEnd::Terminator));
        assert_eq!(text(b"\"x\xc3\xa9y\ti\""), ("xyi".to_string(), FieldEnd::EndOfStream));
    }

    #[test]
    fn test_quoted_newline_is_absorbed() {
        let records = read_all(b"1,\"two\nlines\",\"MIT\"\n2,B,C\n", &PAIR);
        assert_eq!(records.len(), 2);
        assert_eq!(texts(&records[0]), ["twolines", "MIT"]);
        assert_eq!(texts(&records[1]), ["B", "C"]);
    }

    #[test]
    fn test_int_field_missing_at_end_of_stream() {
        assert_eq!(tokenizer(b"").read_int_field().unwrap(), None);
    }

    #[test]
    fn test_int_field_ignores_non_digits() {
        let field = tokenizer(b"1a2 ,rest").read_int_field().unwrap().unwrap();
        assert_eq!(field, IntField { value: 12, has_digits: true, end: FieldEnd::Delimiter });
    }

    #[test]
    fn test_int_field_without_digits_is_zero() {
        let field = tokenizer(b"abc\n").read_int_field().unwrap().unwrap();
        assert_eq!(field, IntField { value: 0, has_digits: false, end: FieldEnd::Terminator });
    }

    #[test]
    fn test_int_field_overflow() {
        let result = tokenizer(b"4294967296,").read_int_field();
        assert!(matches!(result, Err(FieldError::Overflow)));

        let field = tokenizer(b"4294967295").read_int_field().unwrap().unwrap();
        assert_eq!(field.value, u32::MAX);
        assert_eq!(field.end, FieldEnd::EndOfStream);
    }

    #[test]
    fn test_number_field_keeps_digits_only() {
        let mut tok = tokenizer(b"\"19,9a7\",x");
        assert_eq!(tok.read_number_field().unwrap(), (1997, FieldEnd::Delimiter));
    }

    #[test]
    fn test_text_field_too_long() {
        let options = LoadOptions {
            max_field_len: 4,
            ..LoadOptions::default()
        };
        let mut tok = FieldTokenizer::new(Cursor::new(b"abcd,abcde,".to_vec()), &options);
        let mut out = String::new();
        assert_eq!(tok.read_text_field(&mut out).unwrap(), FieldEnd::Delimiter);
        assert_eq!(out, "abcd");
        assert!(matches!(tok.read_text_field(&mut out), Err(FieldError::TooLong { limit: 4 })));
    }

    #[test]
    fn test_record_too_long_field_names_record() {
        let options = LoadOptions {
            max_field_len: 3,
            ..LoadOptions::default()
        };
        let mut tok = FieldTokenizer::new(Cursor::new(b"7,Jane Doe,MIT\n".to_vec()), &options);
        let err = tok.read_record(&PAIR).unwrap_err();
        assert!(matches!(
            err,
            ParseError::FieldTooLong {
                kind: RecordKind::Author,
                id: 7,
                field: "name",
                limit: 3
            }
        ));
    }

    #[test]
    fn test_record_with_extra_field_is_fatal() {
        let mut tok = tokenizer(b"1,a,b\n9,a,b,c\n");
        assert!(tok.read_record(&PAIR).unwrap().is_some());
        let err = tok.read_record(&PAIR).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TooManyFields {
                kind: RecordKind::Author,
                id: 9,
                expected: 3
            }
        ));
    }

    #[test]
    fn test_overflowing_id_reports_last_parsed_id() {
        let mut tok = tokenizer(b"5,a,b\n99999999999,a,b\n");
        assert!(tok.read_record(&PAIR).unwrap().is_some());
        assert_eq!(tok.last_id(), Some(5));
        let err = tok.read_record(&PAIR).unwrap_err();
        assert!(matches!(
            err,
            ParseError::IntegerOverflow {
                kind: RecordKind::Author,
                field: "id",
                id: None,
                last_id: Some(5)
            }
        ));
    }

    #[test]
    fn test_overflow_in_second_id_names_record_and_last_parsed_id() {
        let mut tok = tokenizer(b"10,100,A\n20,99999999999,B\n");
        assert!(tok.read_record(&LINK).unwrap().is_some());
        let err = tok.read_record(&LINK).unwrap_err();
        assert!(matches!(
            err,
            ParseError::IntegerOverflow {
                kind: RecordKind::PaperAuthor,
                field: "author_id",
                id: Some(20),
                last_id: Some(10)
            }
        ));
        assert_eq!(tok.last_id(), Some(10));
    }

    #[test]
    fn test_overflow_in_first_record_has_no_last_id() {
        let err = tokenizer(b"1,99999999999,A\n").read_record(&LINK).unwrap_err();
        assert!(matches!(
            err,
            ParseError::IntegerOverflow {
                id: Some(1),
                last_id: None,
                ..
            }
        ));
    }

    #[test]
    fn test_number_field_overflow_reads_as_zero() {
        let mut tok = tokenizer(b"\"1998-1999, 2000/2001\",x");
        assert_eq!(tok.read_number_field().unwrap(), (0, FieldEnd::Delimiter));
        let mut out = String::new();
        assert_eq!(tok.read_text_field(&mut out).unwrap(), FieldEnd::EndOfStream);
        assert_eq!(out, "x");

        let mut tok = tokenizer(b"4294967295\n");
        assert_eq!(tok.read_number_field().unwrap(), (u32::MAX, FieldEnd::Terminator));
    }

    #[test]
    fn test_overflowing_number_keeps_record() {
        let records = read_all(b"1,T,12345678901234567890\n2,U,2001\n", &MIXED);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].values()[2], FieldValue::Int(0));
        assert_eq!(records[1].values()[2], FieldValue::Int(2001));
    }

    #[test]
    fn test_defaults_follow_layout() {
        let record = RawRecord::defaults(&MIXED);
        assert_eq!(
            record.values(),
            [FieldValue::Int(0), FieldValue::Text(String::new()), FieldValue::Int(0)]
        );
    }

    #[test]
    fn test_short_line_defaults_missing_fields() {
        let records = read_all(b"1,only\n2\n", &MIXED);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].values(),
            [FieldValue::Int(1), FieldValue::Text("only".to_string()), FieldValue::Int(0)]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let records = read_all(b"\n1,a,b\n\r\n\n2,c,d\n", &PAIR);
        assert_eq!(records.len(), 2);
        assert_eq!(texts(&records[1]), ["c", "d"]);
    }

    #[test]
    fn test_final_record_without_newline_is_kept() {
        let records = read_all(b"1,a,b\n2,c,d", &PAIR);
        assert_eq!(records.len(), 2);
        assert_eq!(texts(&records[1]), ["c", "d"]);
    }

    #[test]
    fn test_truncated_final_record_is_discarded() {
        let records = read_all(b"1,a,b\n2,c", &PAIR);
        assert_eq!(records.len(), 1);

        let records = read_all(b"1,a,b\n2", &PAIR);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_two_leading_ids() {
        let records = read_all(b"10,100,\"A\"\n10,5\n20,200,B\n30", &LINK);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].values()[..2], [FieldValue::Int(10), FieldValue::Int(100)]);
        assert_eq!(records[1].values()[..2], [FieldValue::Int(20), FieldValue::Int(200)]);
    }

    #[test]
    fn test_fields_consume_in_layout_order() {
        let record = read_all(b"3,T,2001\n", &MIXED).remove(0);
        let mut fields = record.into_fields();
        assert_eq!(fields.int(), 3);
        assert_eq!(fields.text(), "T");
        assert_eq!(fields.int(), 2001);
    }

    #[test]
    fn test_skip_record_respects_quotes() {
        let mut tok = tokenizer(b"\"a\nb,c\",d\n42,");
        tok.skip_record().unwrap();
        let field = tok.read_int_field().unwrap().unwrap();
        assert_eq!(field.value, 42);
    }
}
