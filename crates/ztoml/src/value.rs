//! Typed TOML values

use time::Date;

use crate::datetime::{Datetime, LocalDatetime, LocalTime, OffsetDatetime};
use crate::key::Key;

/// Float payload: the IEEE-754 value plus how the source wrote it.
///
/// `precision` is the count of fractional digits in the source and
/// `scientific` records an `e`/`E` exponent; both steer emission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Float {
    pub value: f64,
    pub precision: usize,
    pub scientific: bool,
}

impl Float {
    pub const fn new(value: f64, precision: usize, scientific: bool) -> Self {
        Self {
            value,
            precision,
            scientific,
        }
    }
}

/// A TOML value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Integer in any of the four bases
    Integer(i64),
    /// Float with its rendering hints
    Float(Float),
    /// `true` or `false`
    Boolean(bool),
    /// Any of the four string forms, decoded
    String(String),
    /// RFC 3339 datetime with offset (or `Z`)
    OffsetDatetime(OffsetDatetime),
    /// Datetime without offset
    LocalDatetime(LocalDatetime),
    /// Calendar date
    LocalDate(Date),
    /// Time of day
    LocalTime(LocalTime),
    /// Ordered, possibly heterogeneous sequence
    Array(Vec<Value>),
    /// Inline table nested inside an array value
    InlineTable(Box<Key>),
}

impl Value {
    /// Tag used in error messages and the emitted form
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "bool",
            Self::String(_) => "string",
            Self::OffsetDatetime(_) => "datetime",
            Self::LocalDatetime(_) => "datetime-local",
            Self::LocalDate(_) => "date-local",
            Self::LocalTime(_) => "time-local",
            Self::Array(_) => "array",
            Self::InlineTable(_) => "table",
        }
    }

    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub const fn is_datetime(&self) -> bool {
        matches!(
            self,
            Self::OffsetDatetime(_)
                | Self::LocalDatetime(_)
                | Self::LocalDate(_)
                | Self::LocalTime(_)
        )
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(float) => Some(float.value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_offset_datetime(&self) -> Option<&OffsetDatetime> {
        match self {
            Self::OffsetDatetime(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_local_datetime(&self) -> Option<&LocalDatetime> {
        match self {
            Self::LocalDatetime(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_local_date(&self) -> Option<Date> {
        match self {
            Self::LocalDate(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_local_time(&self) -> Option<&LocalTime> {
        match self {
            Self::LocalTime(value) => Some(value),
            _ => None,
        }
    }

    /// Any of the four datetime shapes as one view
    pub fn as_datetime(&self) -> Option<Datetime<'_>> {
        match self {
            Self::OffsetDatetime(value) => Some(Datetime::Offset(value)),
            Self::LocalDatetime(value) => Some(Datetime::Local(value)),
            Self::LocalDate(value) => Some(Datetime::Date(*value)),
            Self::LocalTime(value) => Some(Datetime::Time(value)),
            _ => None,
        }
    }

    pub fn as_inline_table(&self) -> Option<&Key> {
        match self {
            Self::InlineTable(table) => Some(table.as_ref()),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Float> for Value {
    fn from(value: Float) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Array(values)
    }
}
