//! Tool configuration loaded from `bibdb.toml`.

#[expect(clippy::module_inception, reason = "the config type lives in its own file like the other modules")]
mod config;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
