//! Key and table-header parsing
//!
//! A dotted path is a sequence of bare, basic-quoted or literal-quoted
//! segments separated by `.`, ending at `=` for key-value pairs, `]` for
//! table headers and `]]` for array-table headers. The delimiter is consumed
//! here; kinds are assigned by the caller when the path is attached.

use crate::classify;
use crate::error::{Error, ErrorKind, Result};
use crate::limits::Limits;
use crate::parser::string::parse_escape;
use crate::parser::{at_newline, skip_whitespace};
use crate::scanner::Scanner;

/// Dotted key path up to and including `=`
pub(crate) fn parse_key_path(scanner: &mut Scanner, limits: &Limits) -> Result<Vec<String>> {
    parse_path(scanner, limits, b'=')
}

/// Header path up to and including `]`
pub(crate) fn parse_table_path(scanner: &mut Scanner, limits: &Limits) -> Result<Vec<String>> {
    parse_path(scanner, limits, b']')
}

/// Header path up to and including `]]`
pub(crate) fn parse_array_table_path(
    scanner: &mut Scanner,
    limits: &Limits,
) -> Result<Vec<String>> {
    let path = parse_path(scanner, limits, b']')?;
    if !classify::is_table_end(scanner.current()) {
        return Err(Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            "expected ]] to close array table header",
        ));
    }
    scanner.advance();
    Ok(path)
}

fn parse_path(scanner: &mut Scanner, limits: &Limits, end: u8) -> Result<Vec<String>> {
    let mut segments = Vec::new();
    let mut expecting = true;
    while scanner.has_more() {
        let b = scanner.current();
        if b == end {
            if expecting {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    format!("found {:?} while expecting a key", char::from(end)),
                ));
            }
            scanner.advance();
            return Ok(segments);
        } else if classify::is_dot(b) {
            if expecting {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "found . while expecting a key",
                ));
            }
            scanner.advance();
            expecting = true;
        } else if classify::is_whitespace(b) {
            skip_whitespace(scanner);
        } else if classify::is_basic_string_start(b) {
            scanner.advance();
            segments.push(parse_basic_quoted(scanner, limits, end)?);
            expecting = false;
        } else if classify::is_literal_string_start(b) {
            scanner.advance();
            segments.push(parse_literal_quoted(scanner, limits, end)?);
            expecting = false;
        } else {
            segments.push(parse_bare(scanner, limits, end)?);
            expecting = false;
        }
    }
    Err(Error::with_message(
        ErrorKind::Decode,
        scanner.position(),
        "unexpected end of input in key",
    ))
}

/// Bare segment; stops at `.`, the end delimiter or surrounding blanks
fn parse_bare(scanner: &mut Scanner, limits: &Limits, end: u8) -> Result<String> {
    let mut id = String::new();
    let mut done = false;
    while scanner.has_more() {
        if id.len() >= limits.max_id_length {
            return Err(Error::new(
                ErrorKind::BufferOverflow {
                    max: limits.max_id_length,
                },
                scanner.position(),
            ));
        }
        let b = scanner.current();
        if classify::is_dot(b) || b == end {
            if id.is_empty() {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "key cannot be empty",
                ));
            }
            return Ok(id);
        } else if classify::is_whitespace(b) {
            // bare segments cannot contain blanks; remember we left one
            done = true;
            skip_whitespace(scanner);
        } else if classify::is_bare_key(b) && !done {
            id.push(char::from(b));
            scanner.advance();
        } else if classify::is_bare_key(b) && end == b'=' {
            // a second word where the separator should be
            return Err(Error::new(ErrorKind::MissingSeparator, scanner.position()));
        } else {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                format!("unexpected character {:?} in key", char::from(b)),
            ));
        }
    }
    Err(Error::with_message(
        ErrorKind::Decode,
        scanner.position(),
        "unexpected end of input in key",
    ))
}

/// `"…"` segment with basic-string escapes; the opening quote is consumed
fn parse_basic_quoted(scanner: &mut Scanner, limits: &Limits, end: u8) -> Result<String> {
    let mut id = Vec::new();
    while scanner.has_more() {
        if id.len() >= limits.max_id_length {
            return Err(Error::new(
                ErrorKind::BufferOverflow {
                    max: limits.max_id_length,
                },
                scanner.position(),
            ));
        }
        let b = scanner.current();
        if classify::is_basic_string_start(b) {
            scanner.advance();
            return finish_quoted(scanner, id, end);
        } else if at_newline(scanner)? {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "unescaped newline while parsing key",
            ));
        } else if classify::is_escape(b) {
            scanner.advance();
            match parse_escape(scanner)? {
                Some(ch) => {
                    let mut buf = [0u8; 4];
                    id.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
                None => {
                    return Err(Error::with_message(
                        ErrorKind::Decode,
                        scanner.position(),
                        "unknown escape sequence in key",
                    ));
                }
            }
        } else if classify::is_control(b) {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "control characters need to be escaped",
            ));
        } else {
            id.push(b);
            scanner.advance();
        }
    }
    Err(Error::with_message(
        ErrorKind::Decode,
        scanner.position(),
        "unterminated quoted key",
    ))
}

/// `'…'` segment, no escapes; the opening quote is consumed
fn parse_literal_quoted(scanner: &mut Scanner, limits: &Limits, end: u8) -> Result<String> {
    let mut id = Vec::new();
    while scanner.has_more() {
        if id.len() >= limits.max_id_length {
            return Err(Error::new(
                ErrorKind::BufferOverflow {
                    max: limits.max_id_length,
                },
                scanner.position(),
            ));
        }
        let b = scanner.current();
        if classify::is_literal_string_start(b) {
            scanner.advance();
            return finish_quoted(scanner, id, end);
        } else if at_newline(scanner)? {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "unescaped newline while parsing key",
            ));
        } else if classify::is_control_literal(b) {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "control characters need to be escaped",
            ));
        } else {
            id.push(b);
            scanner.advance();
        }
    }
    Err(Error::with_message(
        ErrorKind::Decode,
        scanner.position(),
        "unterminated quoted key",
    ))
}

/// After the closing quote: blanks, then the segment must end at `.` or the
/// delimiter, which stays unconsumed for the path loop
fn finish_quoted(scanner: &mut Scanner, id: Vec<u8>, end: u8) -> Result<String> {
    if classify::is_whitespace(scanner.current()) {
        skip_whitespace(scanner);
    }
    let b = scanner.current();
    if !classify::is_dot(b) && b != end {
        return Err(Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            format!("unexpected character {:?} after end of key", char::from(b)),
        ));
    }
    String::from_utf8(id).map_err(|_| {
        Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            "key is not valid utf-8",
        )
    })
}
