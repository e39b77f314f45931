//! Configurable parser limits

/// Bounds enforced while parsing.
///
/// Every limit is checked during the parse and a violation surfaces as a
/// [`BufferOverflow`](crate::ErrorKind::BufferOverflow) error. The defaults
/// match the reference conformance configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Bytes of rendered format per datetime value
    pub max_date_format: usize,
    /// Bytes per key segment
    pub max_id_length: usize,
    /// Bytes per string value
    pub max_string_length: usize,
    /// Bytes per input document
    pub max_file_size: usize,
    /// Lines tracked for backtracking
    pub max_num_lines: usize,
    /// Children per table
    pub max_subkeys: usize,
    /// Elements per array
    pub max_array_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_date_format: 64,
            max_id_length: 256,
            max_string_length: 4096,
            max_file_size: 1 << 30,
            max_num_lines: 1 << 24,
            max_subkeys: 1 << 17,
            max_array_length: 1 << 17,
        }
    }
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = max;
        self
    }

    pub const fn with_max_file_size(mut self, max: usize) -> Self {
        self.max_file_size = max;
        self
    }

    pub const fn with_max_subkeys(mut self, max: usize) -> Self {
        self.max_subkeys = max;
        self
    }

    pub const fn with_max_array_length(mut self, max: usize) -> Self {
        self.max_array_length = max;
        self
    }

    pub const fn with_max_id_length(mut self, max: usize) -> Self {
        self.max_id_length = max;
        self
    }
}
