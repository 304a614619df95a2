use super::byte_reader::DEFAULT_BUFFER_SIZE;

/// Upper bound on the length of a single text field when none is configured.
pub const DEFAULT_MAX_FIELD_LEN: usize = 4096;

/// Knobs controlling how source files are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Capacity of the read-ahead buffer used for each file.
    pub buffer_size: usize,

    /// Maximum number of bytes kept for any text field.
    pub max_field_len: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}
