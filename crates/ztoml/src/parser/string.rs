//! String value parsing: basic and literal, single- and multi-line
//!
//! Callers consume the opening delimiter(s); these functions consume through
//! the closing delimiter and return the decoded text. Strings accumulate as
//! raw bytes and are checked as UTF-8 once, at the end.

use crate::classify;
use crate::error::{Error, ErrorKind, Result};
use crate::limits::Limits;
use crate::parser::{at_newline, skip_whitespace};
use crate::scanner::Scanner;

/// Decode one escape sequence; the scanner sits on the byte after `\`.
///
/// Returns `None` without consuming when the byte does not start an escape,
/// so multi-line strings can treat `\` at end of line as a fold.
pub(crate) fn parse_escape(scanner: &mut Scanner) -> Result<Option<char>> {
    let ch = match scanner.current() {
        b'b' => '\u{0008}',
        b't' => '\t',
        b'n' => '\n',
        b'f' => '\u{000C}',
        b'r' => '\r',
        b'"' => '"',
        b'\\' => '\\',
        b'u' => {
            scanner.advance();
            return parse_unicode(scanner, 4).map(Some);
        }
        b'U' => {
            scanner.advance();
            return parse_unicode(scanner, 8).map(Some);
        }
        _ => return Ok(None),
    };
    scanner.advance();
    Ok(Some(ch))
}

/// `\uXXXX` / `\UXXXXXXXX`: exactly `digits` hex digits encoding a Unicode
/// scalar value (surrogates and out-of-range values rejected)
fn parse_unicode(scanner: &mut Scanner, digits: u32) -> Result<char> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        let digit = match scanner.current() {
            b @ b'0'..=b'9' => u32::from(b - b'0'),
            b @ b'a'..=b'f' => u32::from(b - b'a') + 10,
            b @ b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "invalid unicode escape",
                ));
            }
        };
        value = (value << 4) | digit;
        scanner.advance();
    }
    char::from_u32(value).ok_or_else(|| {
        Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            "escape is not a unicode scalar value",
        )
    })
}

/// `"…"` or `"""…"""` body
pub(crate) fn parse_basic_string(
    scanner: &mut Scanner,
    limits: &Limits,
    multi: bool,
) -> Result<String> {
    let mut value: Vec<u8> = Vec::new();
    while scanner.has_more() {
        check_length(&value, scanner, limits)?;
        let b = scanner.current();
        if classify::is_basic_string_start(b) {
            if !multi {
                scanner.advance();
                return finish(value, scanner);
            }
            let a = usize::from(scanner.advance());
            let c = usize::from(scanner.advance());
            if classify::is_basic_string_start(scanner.current())
                && classify::is_basic_string_start(scanner.previous())
            {
                // closing """; up to two more quotes belong to the string
                scanner.advance();
                if classify::is_basic_string_start(scanner.current()) {
                    value.push(b'"');
                    scanner.advance();
                }
                check_length(&value, scanner, limits)?;
                if classify::is_basic_string_start(scanner.current()) {
                    value.push(b'"');
                    scanner.advance();
                }
                return finish(value, scanner);
            }
            if a + c < 2 {
                break;
            }
            value.push(b'"');
            scanner.backtrack(1)?;
            continue;
        }
        if at_newline(scanner)? {
            if !multi {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "newline before end of string",
                ));
            }
            if value.is_empty() {
                // newline right after the opener is stripped
                scanner.advance();
                continue;
            }
            value.push(b'\n');
            scanner.advance();
            continue;
        }
        if classify::is_escape(b) {
            scanner.advance();
            match parse_escape(scanner)? {
                Some(ch) => {
                    let mut buf = [0u8; 4];
                    value.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
                None if multi => fold_line_ending(scanner)?,
                None => {
                    return Err(Error::with_message(
                        ErrorKind::Decode,
                        scanner.position(),
                        format!(
                            "unknown escape sequence \\{}",
                            char::from(scanner.current())
                        ),
                    ));
                }
            }
            continue;
        }
        if (!multi && classify::is_control(b)) || (multi && classify::is_control_multi(b)) {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "control characters need to be escaped",
            ));
        }
        value.push(b);
        scanner.advance();
    }
    Err(Error::with_message(
        ErrorKind::Decode,
        scanner.position(),
        "unterminated string",
    ))
}

/// `'…'` or `'''…'''` body; no escape processing
pub(crate) fn parse_literal_string(
    scanner: &mut Scanner,
    limits: &Limits,
    multi: bool,
) -> Result<String> {
    let mut value: Vec<u8> = Vec::new();
    while scanner.has_more() {
        check_length(&value, scanner, limits)?;
        let b = scanner.current();
        if classify::is_literal_string_start(b) {
            if !multi {
                scanner.advance();
                return finish(value, scanner);
            }
            let a = usize::from(scanner.advance());
            let c = usize::from(scanner.advance());
            if classify::is_literal_string_start(scanner.current())
                && classify::is_literal_string_start(scanner.previous())
            {
                scanner.advance();
                if classify::is_literal_string_start(scanner.current()) {
                    value.push(b'\'');
                    scanner.advance();
                }
                check_length(&value, scanner, limits)?;
                if classify::is_literal_string_start(scanner.current()) {
                    value.push(b'\'');
                    scanner.advance();
                }
                return finish(value, scanner);
            }
            if a + c < 2 {
                break;
            }
            value.push(b'\'');
            scanner.backtrack(1)?;
            continue;
        }
        if at_newline(scanner)? {
            if !multi {
                return Err(Error::with_message(
                    ErrorKind::Decode,
                    scanner.position(),
                    "newline before end of string",
                ));
            }
            if value.is_empty() {
                scanner.advance();
                continue;
            }
            value.push(b'\n');
            scanner.advance();
            continue;
        }
        if classify::is_control_literal(b) {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "control characters are not allowed in literal strings",
            ));
        }
        value.push(b);
        scanner.advance();
    }
    Err(Error::with_message(
        ErrorKind::Decode,
        scanner.position(),
        "unterminated string",
    ))
}

/// `\` at end of line: swallow the newline and all leading blanks of the
/// following lines; at least one newline must occur
fn fold_line_ending(scanner: &mut Scanner) -> Result<()> {
    let mut hit = false;
    loop {
        if classify::is_whitespace(scanner.current()) {
            skip_whitespace(scanner);
        } else if at_newline(scanner)? {
            hit = true;
            scanner.advance();
        } else {
            break;
        }
    }
    if hit {
        Ok(())
    } else {
        Err(Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            "cannot have characters on the same line after \\",
        ))
    }
}

fn check_length(value: &[u8], scanner: &Scanner, limits: &Limits) -> Result<()> {
    if value.len() >= limits.max_string_length {
        return Err(Error::new(
            ErrorKind::BufferOverflow {
                max: limits.max_string_length,
            },
            scanner.position(),
        ));
    }
    Ok(())
}

fn finish(value: Vec<u8>, scanner: &Scanner) -> Result<String> {
    String::from_utf8(value).map_err(|_| {
        Error::with_message(
            ErrorKind::Decode,
            scanner.position(),
            "string is not valid utf-8",
        )
    })
}
