//! Value dispatch, arrays and inline tables
//!
//! A value is selected by its first byte: quotes open one of the string
//! forms, a sign or digit starts the number/datetime probe, `[` an array,
//! `{` an inline table, and `t`/`f`/`i`/`n` the keyword literals.

use crate::builder;
use crate::classify;
use crate::error::{Error, ErrorKind, Result};
use crate::key::{Key, KeyKind};
use crate::limits::Limits;
use crate::parser::{at_newline, key, parse_comment, skip_whitespace};
use crate::parser::{datetime, number, string};
use crate::scanner::Scanner;
use crate::value::{Float, Value};

/// Number terminators inside an array
const ARRAY_END: &[u8] = b"#,] \r\n";
/// Number terminators inside an inline table
const INLINE_END: &[u8] = b", }";

pub(crate) fn parse_value(
    scanner: &mut Scanner,
    limits: &Limits,
    num_end: &[u8],
) -> Result<Value> {
    while scanner.has_more() {
        if at_newline(scanner)? {
            return Err(Error::with_message(
                ErrorKind::MissingValue,
                scanner.position(),
                "got a newline before any value",
            ));
        }
        let b = scanner.current();
        if classify::is_whitespace(b) {
            skip_whitespace(scanner);
        } else if classify::is_basic_string_start(b) {
            scanner.advance();
            return parse_string_value(scanner, limits, b'"');
        } else if classify::is_literal_string_start(b) {
            scanner.advance();
            return parse_string_value(scanner, limits, b'\'');
        } else if classify::is_number_start(b) {
            return parse_number_or_datetime(scanner, limits, num_end);
        } else if classify::is_array_start(b) {
            scanner.advance();
            return parse_array(scanner, limits);
        } else if classify::is_inline_table_start(b) {
            scanner.advance();
            return parse_inline_table(scanner, limits);
        } else if b == b't' || b == b'f' {
            return parse_boolean(scanner).map(Value::Boolean);
        } else if b == b'i' || b == b'n' {
            let value = number::parse_inf_nan(scanner, false)?;
            return Ok(Value::Float(Float::new(value, 0, false)));
        } else {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "unknown value type",
            ));
        }
    }
    Err(Error::new(ErrorKind::MissingValue, scanner.position()))
}

/// One or three opening quotes select the single- or multi-line form; two
/// quotes are the empty string
fn parse_string_value(scanner: &mut Scanner, limits: &Limits, quote: u8) -> Result<Value> {
    let basic = quote == b'"';
    if scanner.current() != quote {
        return parse_string_body(scanner, limits, basic, false);
    }
    scanner.advance();
    if scanner.has_more() && scanner.current() == quote {
        scanner.advance();
        return parse_string_body(scanner, limits, basic, true);
    }
    Ok(Value::String(String::new()))
}

fn parse_string_body(
    scanner: &mut Scanner,
    limits: &Limits,
    basic: bool,
    multi: bool,
) -> Result<Value> {
    let text = if basic {
        string::parse_basic_string(scanner, limits, multi)?
    } else {
        string::parse_literal_string(scanner, limits, multi)?
    };
    Ok(Value::String(text))
}

/// Probe the first bytes to split datetimes from numbers: `:` two bytes in
/// marks a time, `-` four digits in marks a date
fn parse_number_or_datetime(
    scanner: &mut Scanner,
    limits: &Limits,
    num_end: &[u8],
) -> Result<Value> {
    let a = usize::from(scanner.advance());
    let b = usize::from(scanner.advance());
    if scanner.has_more() && scanner.current() == b':' {
        scanner.backtrack(a + b)?;
        return datetime::parse_datetime(scanner, limits, num_end);
    }
    if !classify::is_digit(scanner.previous()) || !classify::is_digit(scanner.current()) {
        scanner.backtrack(a + b)?;
    } else {
        let c = usize::from(scanner.advance());
        let d = usize::from(scanner.advance());
        let dated = scanner.has_more() && scanner.current() == b'-';
        scanner.backtrack(a + b + c + d)?;
        if dated {
            return datetime::parse_datetime(scanner, limits, num_end);
        }
    }
    number::parse_number(scanner, limits, num_end)
}

/// Exactly `true` or `false`
fn parse_boolean(scanner: &mut Scanner) -> Result<bool> {
    let (literal, value): (&[u8], bool) = if scanner.current() == b't' {
        (b"true", true)
    } else {
        (b"false", false)
    };
    for &expected in literal {
        if scanner.current() != expected {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "expecting true or false but could not parse",
            ));
        }
        scanner.advance();
    }
    Ok(value)
}

/// `[ … ]` with newlines and comments anywhere; trailing comma allowed
fn parse_array(scanner: &mut Scanner, limits: &Limits) -> Result<Value> {
    let mut values = Vec::new();
    let mut sep = true;
    while scanner.has_more() {
        if values.len() >= limits.max_array_length {
            return Err(Error::new(
                ErrorKind::BufferOverflow {
                    max: limits.max_array_length,
                },
                scanner.position(),
            ));
        }
        let b = scanner.current();
        if classify::is_array_end(b) {
            scanner.advance();
            return Ok(Value::Array(values));
        } else if classify::is_array_separator(b) {
            if sep {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "expected value but got , instead",
                ));
            }
            sep = true;
            scanner.advance();
        } else if at_newline(scanner)? {
            scanner.advance();
        } else if classify::is_whitespace(b) {
            skip_whitespace(scanner);
        } else if classify::is_comment_start(b) {
            parse_comment(scanner)?;
        } else {
            if !sep {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "expected , between elements",
                ));
            }
            let value = parse_value(scanner, limits, ARRAY_END)?;
            values.push(value);
            sep = false;
        }
    }
    Err(Error::with_message(
        ErrorKind::Decode,
        scanner.position(),
        "unterminated array",
    ))
}

/// `{ key = value, … }` on a single line; no trailing comma
fn parse_inline_table(scanner: &mut Scanner, limits: &Limits) -> Result<Value> {
    let mut scratch = Key::new(KeyKind::TableBranch, "");
    let mut sep = true;
    let mut first = true;
    while scanner.has_more() {
        let b = scanner.current();
        if classify::is_inline_table_end(b) {
            if sep && !first {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "cannot have trailing comma in inline table",
                ));
            }
            scanner.advance();
            return Ok(Value::InlineTable(Box::new(scratch)));
        } else if classify::is_inline_table_separator(b) {
            if sep {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "expected key-value but got , instead",
                ));
            }
            sep = true;
            scanner.advance();
        } else if at_newline(scanner)? {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "found newline in inline table",
            ));
        } else if classify::is_whitespace(b) {
            skip_whitespace(scanner);
        } else {
            if !sep {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "expected , between elements",
                ));
            }
            let path = key::parse_key_path(scanner, limits)?;
            let value = parse_value(scanner, limits, INLINE_END)?;
            let pos = scanner.position();
            let leaf = builder::attach_path(
                &mut scratch,
                &path,
                KeyKind::KeyBranch,
                KeyKind::KeyLeaf,
                limits,
                pos,
            )?;
            builder::install_value(leaf, value);
            skip_whitespace(scanner);
            sep = false;
            first = false;
        }
    }
    Err(Error::with_message(
        ErrorKind::Decode,
        scanner.position(),
        "unterminated inline table",
    ))
}
