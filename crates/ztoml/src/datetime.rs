//! Datetime value model
//!
//! Storage and validation lean on the `time` crate: `time::Date` applies the
//! Gregorian calendar (including the leap-year rule) and `time::Time` the
//! RFC 3339 component ranges. What TOML adds on top is recorded here: the
//! fractional-second width as written, whether the offset was spelled `Z`,
//! and the signed offset itself in minutes.

use std::fmt;

use time::{Date, Month, Time, UtcOffset};

use crate::error::{Error, ErrorKind, Pos, Result};

/// Fractional seconds with their rendered width.
///
/// One or two digits are padded to milliseconds; longer runs keep their
/// width, up to nine digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frac {
    value: u32,
    digits: u8,
}

impl Frac {
    /// Build from the raw digit run following the decimal point.
    pub fn from_digits(raw: &str, pos: Pos) -> Result<Self> {
        if raw.is_empty() || raw.len() > 9 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::with_message(
                ErrorKind::Decode,
                pos,
                "invalid fractional seconds",
            ));
        }
        let mut value: u32 = raw
            .parse()
            .map_err(|_| Error::with_message(ErrorKind::Decode, pos, "invalid fractional seconds"))?;
        let mut digits = raw.len() as u8;
        while digits < 3 {
            value *= 10;
            digits += 1;
        }
        Ok(Self { value, digits })
    }

    /// Fractional value scaled to the recorded width
    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn digits(&self) -> u8 {
        self.digits
    }

    /// Milliseconds, truncating widths beyond three digits
    pub const fn millis(&self) -> u32 {
        let mut value = self.value;
        let mut digits = self.digits;
        while digits > 3 {
            value /= 10;
            digits -= 1;
        }
        value
    }
}

impl fmt::Display for Frac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.digits as usize)
    }
}

/// RFC 3339 datetime with a UTC offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffsetDatetime {
    pub date: Date,
    pub time: Time,
    pub frac: Option<Frac>,
    /// Signed offset; minutes east of UTC
    pub offset: UtcOffset,
    /// The source wrote `Z` rather than an explicit offset
    pub zulu: bool,
}

impl OffsetDatetime {
    /// Offset in signed minutes
    pub const fn offset_minutes(&self) -> i32 {
        self.offset.whole_minutes() as i32
    }
}

impl fmt::Display for OffsetDatetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, self.date)?;
        f.write_str("T")?;
        write_time(f, self.time, self.frac)?;
        if self.zulu {
            f.write_str("Z")
        } else {
            let minutes = self.offset.whole_minutes();
            let sign = if minutes < 0 { '-' } else { '+' };
            let minutes = minutes.unsigned_abs();
            write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
        }
    }
}

/// Datetime without an offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalDatetime {
    pub date: Date,
    pub time: Time,
    pub frac: Option<Frac>,
}

impl fmt::Display for LocalDatetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, self.date)?;
        f.write_str("T")?;
        write_time(f, self.time, self.frac)
    }
}

/// Time of day without a date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalTime {
    pub time: Time,
    pub frac: Option<Frac>,
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_time(f, self.time, self.frac)
    }
}

/// One view over the four datetime shapes.
///
/// Lets callers take any datetime out of a key without matching the value
/// variant first; shape-specific fields stay reachable through the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datetime<'a> {
    Offset(&'a OffsetDatetime),
    Local(&'a LocalDatetime),
    Date(Date),
    Time(&'a LocalTime),
}

impl fmt::Display for Datetime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(value) => value.fmt(f),
            Self::Local(value) => value.fmt(f),
            Self::Date(value) => f.write_str(&format_date(*value)),
            Self::Time(value) => value.fmt(f),
        }
    }
}

/// `YYYY-MM-DD` rendering used by displays and the emitter
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn write_date(f: &mut fmt::Formatter<'_>, date: Date) -> fmt::Result {
    f.write_str(&format_date(date))
}

fn write_time(f: &mut fmt::Formatter<'_>, time: Time, frac: Option<Frac>) -> fmt::Result {
    write!(
        f,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )?;
    if let Some(frac) = frac {
        write!(f, ".{frac}")?;
    }
    Ok(())
}

/// Validate and build a calendar date
pub fn make_date(year: i32, month: u8, day: u8, pos: Pos) -> Result<Date> {
    let month = Month::try_from(month)
        .map_err(|_| Error::with_message(ErrorKind::Decode, pos, "invalid month"))?;
    Date::from_calendar_date(year, month, day)
        .map_err(|_| Error::with_message(ErrorKind::Decode, pos, "invalid calendar date"))
}

/// Validate and build a time of day
pub fn make_time(hour: u8, minute: u8, second: u8, pos: Pos) -> Result<Time> {
    Time::from_hms(hour, minute, second)
        .map_err(|_| Error::with_message(ErrorKind::Decode, pos, "invalid time of day"))
}

/// Validate and build a UTC offset from its components
pub fn make_offset(negative: bool, hours: u8, minutes: u8, pos: Pos) -> Result<UtcOffset> {
    if hours > 23 || minutes > 59 {
        return Err(Error::with_message(
            ErrorKind::Decode,
            pos,
            "invalid utc offset",
        ));
    }
    let total = i32::from(hours) * 60 + i32::from(minutes);
    let total = if negative { -total } else { total };
    UtcOffset::from_whole_seconds(total * 60)
        .map_err(|_| Error::with_message(ErrorKind::Decode, pos, "invalid utc offset"))
}
