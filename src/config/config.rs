use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the data directory
pub const CONFIG_FILE_NAME: &str = "bibdb.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Capacity in bytes of the read-ahead buffer used for each source file
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Longest text field accepted, in bytes
    #[serde(default = "default_max_field_len")]
    pub max_field_len: usize,
}

// These mirror `tables::DEFAULT_BUFFER_SIZE` and `tables::DEFAULT_MAX_FIELD_LEN`.
// build.rs compiles this module on its own, so it cannot name them.
const fn default_buffer_size() -> usize {
    8192
}

const fn default_max_field_len() -> usize {
    4096
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `bibdb.toml` is looked up in `data_root`; a missing file
    /// yields the defaults.
    pub fn load(data_root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = data_root.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(app_err!("buffer_size must be greater than 0"));
        }

        if self.max_field_len == 0 {
            return Err(app_err!("max_field_len must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
