use super::Host;
use crate::Result;
use crate::tables::Database;
use std::io::Write;

/// Prints one line per table with its row count.
pub fn print_summary<H: Host>(host: &mut H, db: &Database) -> Result<()> {
    for (kind, count) in db.row_counts() {
        let name: &'static str = kind.into();
        let _ = writeln!(host.output(), "{name:<12} {count:>10}");
    }

    Ok(())
}
