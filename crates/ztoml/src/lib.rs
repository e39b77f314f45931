//! ztoml - TOML v1.0.0 parser with a type-tagged JSON emitter
//!
//! This crate provides functionality to:
//! - Parse TOML documents from strings, bytes, files or readers
//! - Walk the resulting document tree with typed accessors
//! - Emit the tree as the type-tagged JSON form used by conformance suites
//! - Bound every parse with configurable limits
//!
//! # Examples
//! ```
//! use ztoml::{parse_str, to_json, Result};
//!
//! fn example() -> Result<()> {
//!     let root = parse_str("title = \"TOML\"\n")?;
//!     assert_eq!(root.get("title").and_then(|k| k.as_str()), Some("TOML"));
//!     println!("{}", to_json(&root));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]

use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument};

pub mod classify;
pub mod datetime;
pub mod emit;
pub mod error;
pub mod input;
pub mod key;
pub mod limits;
pub mod parser;
pub mod scanner;
pub mod value;

mod builder;

pub use datetime::{Datetime, Frac, LocalDatetime, LocalTime, OffsetDatetime};
pub use emit::{json_to_file, to_json, value_to_json, write_json};
pub use error::{Error, ErrorKind, Pos, Result};
pub use input::Input;
pub use key::{Key, KeyKind};
pub use limits::Limits;
pub use parser::Parser;
pub use value::{Float, Value};

/// Parse a TOML document from a string
pub fn parse_str(input: &str) -> Result<Key> {
    parse_str_with_limits(input, Limits::default())
}

/// Parse a TOML document from a string with explicit limits
pub fn parse_str_with_limits(input: &str, limits: Limits) -> Result<Key> {
    parse_input(Input::from_str(input), limits)
}

/// Parse a TOML document from raw bytes
pub fn parse_bytes(input: Vec<u8>) -> Result<Key> {
    parse_input(Input::from_bytes(input), Limits::default())
}

/// Load and parse a TOML file
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Key> {
    parse_file_with_limits(path, Limits::default())
}

/// Load and parse a TOML file with explicit limits
pub fn parse_file_with_limits(path: impl AsRef<Path>, limits: Limits) -> Result<Key> {
    let input = Input::from_path(path, &limits)?;
    parse_input(input, limits)
}

/// Read an open source to EOF and parse it; the reader is not closed
pub fn parse_reader(reader: impl Read) -> Result<Key> {
    let limits = Limits::default();
    let input = Input::from_reader(reader, &limits)?;
    parse_input(input, limits)
}

/// Parse an already-loaded [`Input`]
pub fn parse_input(input: Input, limits: Limits) -> Result<Key> {
    if input.len() > limits.max_file_size {
        return Err(Error::bare(ErrorKind::BufferOverflow {
            max: limits.max_file_size,
        }));
    }
    debug!(bytes = input.len(), "parsing document");
    let root = Parser::with_limits(input.into_bytes(), limits).parse()?;
    debug!("parse complete");
    Ok(root)
}
