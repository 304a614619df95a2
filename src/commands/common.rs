//! Options shared by every command, and the database loading they drive.

use crate::Result;
use crate::config::Config;
use crate::tables::{Database, LoadOptions};
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use ohno::EnrichableExt;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory holding the source files
    #[arg(long, value_name = "PATH", default_value = ".", global = true)]
    pub data_dir: Utf8PathBuf,

    /// Path to configuration file (default is `bibdb.toml` in the data directory)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Sets up logging, reads the configuration and loads every table.
    pub fn open_database(&self) -> Result<Database> {
        init_logging(self.log_level);

        let config = Config::load(&self.data_dir, self.config.as_ref())?;
        Database::load(&self.data_dir, &load_options(&config))
            .map_err(|e| e.enrich_with(|| format!("loading data directory '{}'", self.data_dir)))
    }
}

#[must_use]
pub const fn load_options(config: &Config) -> LoadOptions {
    LoadOptions {
        buffer_size: config.buffer_size,
        max_field_len: config.max_field_len,
    }
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run repeatedly in one process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_follow_config() {
        let config = Config {
            buffer_size: 64,
            max_field_len: 32,
        };
        assert_eq!(
            load_options(&config),
            LoadOptions {
                buffer_size: 64,
                max_field_len: 32
            }
        );
    }

    #[test]
    fn test_default_config_matches_default_options() {
        assert_eq!(load_options(&Config::default()), LoadOptions::default());
    }

    #[test]
    fn test_omitted_settings_match_default_options() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(load_options(&config), LoadOptions::default());
    }
}
