//! Datetime parsing
//!
//! The raw token is collected first (one interior space is allowed as the
//! date/time separator), then classified in a single left-to-right walk by
//! its structural markers: `:` at offset 2 means a time of day, a date
//! otherwise, then an optional time, fraction, and `Z` or signed offset.

use time::UtcOffset;

use crate::classify;
use crate::datetime::{make_date, make_offset, make_time, Frac, LocalDatetime, LocalTime, OffsetDatetime};
use crate::error::{Error, ErrorKind, Pos, Result};
use crate::limits::Limits;
use crate::scanner::Scanner;
use crate::value::Value;

pub(crate) fn parse_datetime(
    scanner: &mut Scanner,
    limits: &Limits,
    num_end: &[u8],
) -> Result<Value> {
    let pos = scanner.position();
    let mut text = String::new();
    let mut spaces = 0;
    while scanner.has_more() {
        if text.len() >= limits.max_date_format {
            return Err(Error::new(
                ErrorKind::BufferOverflow {
                    max: limits.max_date_format,
                },
                scanner.position(),
            ));
        }
        let b = scanner.current();
        let blank = classify::is_whitespace(b);
        // one interior space may separate date and time; a second blank or
        // any terminator byte ends the token
        if (blank && spaces > 0) || (!blank && classify::is_number_end(b, num_end)) {
            break;
        }
        if blank {
            spaces += 1;
        }
        text.push(char::from(b));
        scanner.advance();
    }
    let token = text.strip_suffix(' ').unwrap_or(&text);
    classify_datetime(token, pos)
}

/// Classify a collected token into one of the nine datetime shapes
fn classify_datetime(token: &str, pos: Pos) -> Result<Value> {
    let mut walk = Walk::new(token.as_bytes(), pos);
    if token.len() >= 3 && token.as_bytes()[2] == b':' {
        let (time, frac) = parse_time_part(&mut walk)?;
        walk.finish()?;
        return Ok(Value::LocalTime(LocalTime { time, frac }));
    }

    let year = walk.digits(4)? as i32;
    walk.expect(b'-')?;
    let month = walk.digits(2)? as u8;
    walk.expect(b'-')?;
    let day = walk.digits(2)? as u8;
    let date = make_date(year, month, day, pos)?;
    if walk.done() {
        return Ok(Value::LocalDate(date));
    }

    match walk.next()? {
        b'T' | b't' | b' ' => {}
        _ => {
            return Err(Error::with_message(
                ErrorKind::Decode,
                pos,
                "invalid date-time separator",
            ));
        }
    }
    let (time, frac) = parse_time_part(&mut walk)?;
    if walk.done() {
        return Ok(Value::LocalDatetime(LocalDatetime { date, time, frac }));
    }

    match walk.next()? {
        b'Z' | b'z' => {
            walk.finish()?;
            Ok(Value::OffsetDatetime(OffsetDatetime {
                date,
                time,
                frac,
                offset: UtcOffset::UTC,
                zulu: true,
            }))
        }
        sign @ (b'+' | b'-') => {
            let hours = walk.digits(2)? as u8;
            walk.expect(b':')?;
            let minutes = walk.digits(2)? as u8;
            walk.finish()?;
            let offset = make_offset(sign == b'-', hours, minutes, pos)?;
            Ok(Value::OffsetDatetime(OffsetDatetime {
                date,
                time,
                frac,
                offset,
                zulu: false,
            }))
        }
        _ => Err(Error::with_message(
            ErrorKind::Decode,
            pos,
            "invalid timezone or offset",
        )),
    }
}

/// `HH:MM:SS` with optional `.` and a digit run
fn parse_time_part(walk: &mut Walk<'_>) -> Result<(time::Time, Option<Frac>)> {
    let hour = walk.digits(2)? as u8;
    walk.expect(b':')?;
    let minute = walk.digits(2)? as u8;
    walk.expect(b':')?;
    let second = walk.digits(2)? as u8;
    let frac = if walk.eat(b'.') {
        let run = walk.digit_run();
        Some(Frac::from_digits(run, walk.pos)?)
    } else {
        None
    };
    let time = make_time(hour, minute, second, walk.pos)?;
    Ok((time, frac))
}

/// Left-to-right cursor over the collected token
struct Walk<'a> {
    bytes: &'a [u8],
    at: usize,
    pos: Pos,
}

impl<'a> Walk<'a> {
    fn new(bytes: &'a [u8], pos: Pos) -> Self {
        Self { bytes, at: 0, pos }
    }

    fn error(&self) -> Error {
        Error::with_message(ErrorKind::Decode, self.pos, "could not parse as datetime")
    }

    fn done(&self) -> bool {
        self.at >= self.bytes.len()
    }

    fn finish(&self) -> Result<()> {
        if self.done() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn next(&mut self) -> Result<u8> {
        let b = *self.bytes.get(self.at).ok_or_else(|| self.error())?;
        self.at += 1;
        Ok(b)
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.bytes.get(self.at) == Some(&expected) {
            self.at += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// Exactly `n` ASCII digits
    fn digits(&mut self, n: usize) -> Result<u32> {
        let run = self
            .bytes
            .get(self.at..self.at + n)
            .ok_or_else(|| self.error())?;
        if !run.iter().all(u8::is_ascii_digit) {
            return Err(self.error());
        }
        self.at += n;
        let mut value = 0u32;
        for &b in run {
            value = value * 10 + u32::from(b - b'0');
        }
        Ok(value)
    }

    /// Greedy run of ASCII digits, as text
    fn digit_run(&mut self) -> &'a str {
        let start = self.at;
        while self.bytes.get(self.at).is_some_and(u8::is_ascii_digit) {
            self.at += 1;
        }
        // the token came from a &str and digits are ASCII
        std::str::from_utf8(&self.bytes[start..self.at]).unwrap_or_default()
    }
}
