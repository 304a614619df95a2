//! Command dispatch logic for bibdb

use super::{CommonArgs, LinksArgs, LookupArgs, LookupKind, print_links, print_row, print_summary};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "bibdb", version, long_about = None)]
#[command(about = "Query author, paper and venue tables of a bibliographic dump")]
#[command(styles = CLAP_STYLES)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: BibdbSubcommand,
}

#[derive(Subcommand, Debug)]
enum BibdbSubcommand {
    /// Print the number of rows in each table
    Summary,
    /// Print one author as JSON
    Author(LookupArgs),
    /// Print one paper as JSON
    Paper(LookupArgs),
    /// Print one conference as JSON
    Conference(LookupArgs),
    /// Print one journal as JSON
    Journal(LookupArgs),
    /// Print paper-author links as JSON lines
    Links(LinksArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the configuration or any source file cannot be loaded
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let args = Args::parse_from(args);
    let db = args.common.open_database()?;

    match &args.command {
        BibdbSubcommand::Summary => print_summary(host, &db),
        BibdbSubcommand::Author(lookup) => print_row(host, &db, LookupKind::Author, lookup),
        BibdbSubcommand::Paper(lookup) => print_row(host, &db, LookupKind::Paper, lookup),
        BibdbSubcommand::Conference(lookup) => print_row(host, &db, LookupKind::Conference, lookup),
        BibdbSubcommand::Journal(lookup) => print_row(host, &db, LookupKind::Journal, lookup),
        BibdbSubcommand::Links(links) => print_links(host, &db, links),
    }
}
