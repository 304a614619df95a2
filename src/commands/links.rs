use super::Host;
use crate::Result;
use crate::tables::{AuthorId, Database, PaperAuthorRow, PaperId};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
#[group(required = true, multiple = true)]
pub struct LinksArgs {
    /// Only links of this paper
    #[arg(long, value_name = "ID")]
    pub paper: Option<u32>,

    /// Only links of this author
    #[arg(long, value_name = "ID")]
    pub author: Option<u32>,
}

/// Prints matching paper-author links, one JSON object per line.
///
/// Links of an author come out ordered by paper id.
pub fn print_links<H: Host>(host: &mut H, db: &Database, args: &LinksArgs) -> Result<()> {
    let links: Vec<&PaperAuthorRow> = match (args.paper, args.author) {
        (Some(paper), Some(author)) => db.paper_authors_by_id(PaperId(paper), AuthorId(author)),
        (Some(paper), None) => db.paper_authors_by_paper_id(PaperId(paper)).iter().collect(),
        (None, Some(author)) => db.paper_authors_by_author_id(AuthorId(author)),
        (None, None) => Vec::new(),
    };

    for link in links {
        let json = serde_json::to_string(link).into_app_err("serializing paper-author link")?;
        let _ = writeln!(host.output(), "{json}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::tables::{PaperAuthorTable, Table};

    fn link(paper: u32, author: u32, name: &str) -> PaperAuthorRow {
        PaperAuthorRow {
            paper_id: PaperId(paper),
            author_id: AuthorId(author),
            name: name.to_string(),
            affiliation: String::new(),
        }
    }

    fn sample() -> Database {
        Database::new(
            Table::default(),
            Table::default(),
            Table::default(),
            Table::default(),
            PaperAuthorTable::new(Table::from_rows(vec![link(20, 100, "C"), link(10, 100, "A"), link(10, 200, "B")])),
        )
    }

    fn names(host: &TestHost) -> Vec<String> {
        host.output_str()
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["name"].as_str().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn test_links_by_author_in_paper_order() {
        let mut host = TestHost::new();
        let args = LinksArgs {
            paper: None,
            author: Some(100),
        };
        print_links(&mut host, &sample(), &args).unwrap();
        assert_eq!(names(&host), ["A", "C"]);
    }

    #[test]
    fn test_links_by_paper_and_author() {
        let mut host = TestHost::new();
        let args = LinksArgs {
            paper: Some(10),
            author: Some(200),
        };
        print_links(&mut host, &sample(), &args).unwrap();
        assert_eq!(names(&host), ["B"]);
    }

    #[test]
    fn test_no_links_prints_nothing() {
        let mut host = TestHost::new();
        let args = LinksArgs {
            paper: Some(99),
            author: None,
        };
        print_links(&mut host, &sample(), &args).unwrap();
        assert!(host.output_str().is_empty());
    }
}
