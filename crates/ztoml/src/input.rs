//! Input sources for the parser

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::limits::Limits;

/// An owned byte source with an optional filename for diagnostics.
///
/// Inputs are consumed as 8-bit bytes; no transcoding happens here. File and
/// reader sources are size-checked against `max_file_size` while loading.
#[derive(Clone, Debug)]
pub struct Input {
    bytes: Vec<u8>,
    filename: Option<String>,
}

impl Input {
    pub fn from_str(source: &str) -> Self {
        Self {
            bytes: source.as_bytes().to_vec(),
            filename: None,
        }
    }

    pub fn from_bytes(source: Vec<u8>) -> Self {
        Self {
            bytes: source,
            filename: None,
        }
    }

    /// Open and fully read a file, rejecting oversized inputs before reading
    pub fn from_path(path: impl AsRef<Path>, limits: &Limits) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|err| {
            Error::with_message(
                ErrorKind::Read,
                Default::default(),
                format!("could not stat {}: {err}", path.display()),
            )
        })?;
        if metadata.len() > limits.max_file_size as u64 {
            return Err(Error::bare(ErrorKind::BufferOverflow {
                max: limits.max_file_size,
            }));
        }
        debug!(path = %path.display(), size = metadata.len(), "reading input file");
        let bytes = fs::read(path).map_err(|err| {
            Error::with_message(
                ErrorKind::Read,
                Default::default(),
                format!("could not read {}: {err}", path.display()),
            )
        })?;
        Ok(Self {
            bytes,
            filename: Some(path.display().to_string()),
        })
    }

    /// Read an open source to EOF; the reader is not closed here
    pub fn from_reader(mut reader: impl Read, limits: &Limits) -> Result<Self> {
        let mut bytes = Vec::new();
        // bound the read so an unbounded stream cannot blow past the limit
        let cap = limits.max_file_size as u64 + 1;
        reader
            .by_ref()
            .take(cap)
            .read_to_end(&mut bytes)
            .map_err(|err| {
                Error::with_message(
                    ErrorKind::Read,
                    Default::default(),
                    format!("could not read input: {err}"),
                )
            })?;
        if bytes.len() > limits.max_file_size {
            return Err(Error::bare(ErrorKind::BufferOverflow {
                max: limits.max_file_size,
            }));
        }
        debug!(size = bytes.len(), "read input stream");
        Ok(Self {
            bytes,
            filename: None,
        })
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<&str> for Input {
    fn from(source: &str) -> Self {
        Self::from_str(source)
    }
}
