//! Command-line front end over a bibliographic data directory.
//!
//! ```bash
//! bibdb --data-dir data summary
//! bibdb --data-dir data author 1
//! bibdb --data-dir data links --author 100
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use bibdb::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that runs real OS commands.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
