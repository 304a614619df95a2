use super::Host;
use crate::Result;
use crate::tables::{AuthorId, ConferenceId, Database, JournalId, PaperId};
use clap::Parser;
use ohno::IntoAppError;
use serde::Serialize;
use std::io::Write;
use strum::Display;

#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// Numeric id of the row to print
    #[arg(value_name = "ID")]
    pub id: u32,
}

/// Which table a lookup goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LookupKind {
    Author,
    Paper,
    Conference,
    Journal,
}

/// Prints the row with the requested id as JSON.
///
/// A missing row is reported on the error stream and ends the process with status 1.
pub fn print_row<H: Host>(host: &mut H, db: &Database, kind: LookupKind, args: &LookupArgs) -> Result<()> {
    let id = args.id;
    match kind {
        LookupKind::Author => write_row(host, kind, id, db.author_by_id(AuthorId(id))),
        LookupKind::Paper => write_row(host, kind, id, db.paper_by_id(PaperId(id))),
        LookupKind::Conference => write_row(host, kind, id, db.conference_by_id(ConferenceId(id))),
        LookupKind::Journal => write_row(host, kind, id, db.journal_by_id(JournalId(id))),
    }
}

fn write_row<H: Host, T: Serialize>(host: &mut H, kind: LookupKind, id: u32, row: Option<&T>) -> Result<()> {
    let Some(row) = row else {
        let _ = writeln!(host.error(), "{kind} {id} not found");
        host.exit(1);
        return Ok(());
    };

    let json = serde_json::to_string_pretty(row).into_app_err_with(|| format!("serializing {kind} {id}"))?;
    let _ = writeln!(host.output(), "{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::tables::{AuthorRow, PaperAuthorTable, PaperRow, Table};

    fn sample() -> Database {
        Database::new(
            Table::default(),
            Table::default(),
            Table::from_rows(vec![AuthorRow {
                id: AuthorId(1),
                name: "Jane Doe".to_string(),
                affiliation: "MIT".to_string(),
            }]),
            Table::from_rows(vec![PaperRow {
                id: PaperId(5),
                title: "A, B".to_string(),
                year: 2009,
                conference_id: None,
                journal_id: None,
                keywords: String::new(),
            }]),
            PaperAuthorTable::default(),
        )
    }

    #[test]
    fn test_found_row_is_json() {
        let mut host = TestHost::new();
        print_row(&mut host, &sample(), LookupKind::Author, &LookupArgs { id: 1 }).unwrap();

        let value: serde_json::Value = serde_json::from_str(&host.output_str()).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["affiliation"], "MIT");
        assert_eq!(host.exit_code, None);
    }

    #[test]
    fn test_missing_reference_serializes_as_null() {
        let mut host = TestHost::new();
        print_row(&mut host, &sample(), LookupKind::Paper, &LookupArgs { id: 5 }).unwrap();

        let value: serde_json::Value = serde_json::from_str(&host.output_str()).unwrap();
        assert_eq!(value["title"], "A, B");
        assert!(value["conference_id"].is_null());
    }

    #[test]
    fn test_missing_row_exits_with_one() {
        let mut host = TestHost::new();
        print_row(&mut host, &sample(), LookupKind::Journal, &LookupArgs { id: 3 }).unwrap();

        assert!(host.output_str().is_empty());
        assert_eq!(host.error_str().trim(), "journal 3 not found");
        assert_eq!(host.exit_code, Some(1));
    }
}
