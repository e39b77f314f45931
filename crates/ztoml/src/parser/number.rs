//! Number parsing: four bases, floats, inf/nan
//!
//! The token is accumulated until a caller-supplied terminator byte, with
//! underscores allowed only between digits. Floats are detected by `.` or an
//! exponent; the fractional digit count and the scientific flag are recorded
//! for emission.

use crate::classify;
use crate::error::{Error, ErrorKind, Result};
use crate::limits::Limits;
use crate::scanner::Scanner;
use crate::value::{Float, Value};

pub(crate) fn parse_number(
    scanner: &mut Scanner,
    limits: &Limits,
    num_end: &[u8],
) -> Result<Value> {
    let mut text = String::new();
    let mut is_float = false;
    let mut scientific = false;
    let mut precision: usize = 0;
    while scanner.has_more() {
        check_length(&text, scanner, limits)?;
        let b = scanner.current();
        if classify::is_number_end(b, num_end) {
            break;
        }
        if text.is_empty() && b == b'0' {
            scanner.advance();
            let base = match scanner.current() {
                b'x' => 16,
                b'o' => 8,
                b'b' => 2,
                _ => {
                    // plain zero prefix; the byte after it is already current
                    text.push('0');
                    continue;
                }
            };
            scanner.advance();
            return parse_base(scanner, limits, base, num_end);
        } else if classify::is_decimal_point(b) || classify::is_underscore(b) {
            if classify::is_decimal_point(b) {
                text.push('.');
                is_float = true;
                precision = 1;
            }
            scanner.advance();
            // both neighbors of a dot or underscore must be digits
            if classify::is_digit(scanner.current()) && classify::is_digit(scanner.prev_previous())
            {
                if precision > 0 {
                    precision += 1;
                }
                text.push(char::from(scanner.current()));
                scanner.advance();
            } else {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    format!("stray {:?} in number", char::from(scanner.previous())),
                ));
            }
        } else if b == b'i' || b == b'n' {
            if text.len() == 1 && (text.starts_with('+') || text.starts_with('-')) {
                let value = parse_inf_nan(scanner, text.starts_with('-'))?;
                return Ok(Value::Float(Float::new(value, 0, false)));
            }
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "unknown or invalid number",
            ));
        } else if matches!(b, b'x' | b'X' | b'b' | b'B' | b'o' | b'O') {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                format!("invalid decimal number, found stray {:?}", char::from(b)),
            ));
        } else {
            text.push(char::from(b));
            if precision > 0 {
                precision += 1;
            }
            if b == b'e' || b == b'E' {
                is_float = true;
                scientific = true;
            }
            scanner.advance();
        }
    }
    finish(&text, is_float, scientific, precision, scanner)
}

/// `inf` / `nan`, entered on the `i` or `n`
pub(crate) fn parse_inf_nan(scanner: &mut Scanner, negative: bool) -> Result<f64> {
    let (literal, value): (&[u8], f64) = if scanner.current() == b'i' {
        (b"inf", f64::INFINITY)
    } else {
        (b"nan", f64::NAN)
    };
    for &expected in literal {
        if scanner.current() != expected {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "expecting inf or nan but could not parse",
            ));
        }
        scanner.advance();
    }
    Ok(if negative { -value } else { value })
}

/// Hex, octal or binary payload after the `0x`/`0o`/`0b` prefix
fn parse_base(scanner: &mut Scanner, limits: &Limits, base: u32, num_end: &[u8]) -> Result<Value> {
    let mut text = String::new();
    while scanner.has_more() {
        check_length(&text, scanner, limits)?;
        let b = scanner.current();
        if classify::is_number_end(b, num_end) {
            break;
        }
        if classify::is_underscore(b) {
            scanner.advance();
            let digit_class = |b: u8| {
                classify::is_digit(b) || (base == 16 && classify::is_hex_digit(b))
            };
            if digit_class(scanner.current()) && digit_class(scanner.prev_previous()) {
                text.push(char::from(scanner.current()));
                scanner.advance();
            } else {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "stray _ in number",
                ));
            }
        } else {
            text.push(char::from(b));
            scanner.advance();
        }
    }
    if text.is_empty() {
        return Err(Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            "incomplete non-decimal number",
        ));
    }
    let value = i64::from_str_radix(&text, base).map_err(|_| {
        Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            format!("could not convert {text} to base {base}"),
        )
    })?;
    Ok(Value::Integer(value))
}

fn finish(
    text: &str,
    is_float: bool,
    scientific: bool,
    precision: usize,
    scanner: &Scanner,
) -> Result<Value> {
    if text.is_empty() {
        return Err(Error::new(ErrorKind::MissingValue, scanner.position()));
    }
    if is_float {
        let value: f64 = text.parse().map_err(|_| {
            Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                format!("could not convert {text} to float"),
            )
        })?;
        return Ok(Value::Float(Float::new(
            value,
            precision.saturating_sub(1),
            scientific,
        )));
    }
    let value: i64 = text.parse().map_err(|_| {
        Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            format!("could not convert {text} to integer"),
        )
    })?;
    if value != 0 {
        let digits = text.trim_start_matches(['+', '-']);
        if digits.starts_with('0') {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "cannot have leading zero for integers",
            ));
        }
    }
    Ok(Value::Integer(value))
}

fn check_length(text: &str, scanner: &Scanner, limits: &Limits) -> Result<()> {
    if text.len() >= limits.max_string_length {
        return Err(Error::new(
            ErrorKind::BufferOverflow {
                max: limits.max_string_length,
            },
            scanner.position(),
        ));
    }
    Ok(())
}
