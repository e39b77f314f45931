//! Type-tagged JSON emission
//!
//! Every scalar serializes as `{"type": <tag>, "value": <string>}`; tables
//! and inline tables become JSON objects keyed by segment in insertion
//! order; arrays and array-tables become JSON arrays. The form is the one
//! conformance suites consume, not a general-purpose JSON encoder.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::datetime::format_date;
use crate::key::{Key, KeyKind};
use crate::value::{Float, Value};

/// Serialize a document tree
pub fn to_json(root: &Key) -> String {
    let mut out = String::new();
    emit_children(root, &mut out);
    out
}

/// Serialize a single value
pub fn value_to_json(value: &Value) -> String {
    let mut out = String::new();
    emit_value(value, &mut out);
    out
}

/// Serialize a document tree into a writer
pub fn write_json(root: &Key, writer: &mut impl Write) -> io::Result<()> {
    writer.write_all(to_json(root).as_bytes())
}

/// Serialize a document tree into a named file
pub fn json_to_file(root: &Key, path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_json(root, &mut file)
}

fn emit_key(key: &Key, out: &mut String) {
    out.push('"');
    escape_into(key.id(), out);
    out.push_str("\": ");
    match key.kind() {
        KeyKind::KeyLeaf => match key.value() {
            Some(value) => emit_value(value, out),
            None => out.push_str("null"),
        },
        KeyKind::ArrayTable => {
            out.push('[');
            for (index, element) in key.elements().iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                emit_children(element, out);
            }
            out.push(']');
        }
        _ => emit_children(key, out),
    }
}

fn emit_children(key: &Key, out: &mut String) {
    out.push('{');
    for (index, child) in key.children().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        emit_key(child, out);
    }
    out.push('}');
}

fn emit_value(value: &Value, out: &mut String) {
    match value {
        Value::String(text) => emit_scalar("string", text, out),
        Value::Integer(number) => emit_scalar("integer", &number.to_string(), out),
        Value::Float(float) => emit_scalar("float", &format_float(float), out),
        Value::Boolean(flag) => {
            emit_scalar("bool", if *flag { "true" } else { "false" }, out);
        }
        Value::OffsetDatetime(datetime) => {
            emit_scalar("datetime", &datetime.to_string(), out);
        }
        Value::LocalDatetime(datetime) => {
            emit_scalar("datetime-local", &datetime.to_string(), out);
        }
        Value::LocalDate(date) => emit_scalar("date-local", &format_date(*date), out),
        Value::LocalTime(timeval) => emit_scalar("time-local", &timeval.to_string(), out),
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                emit_value(item, out);
            }
            out.push(']');
        }
        Value::InlineTable(table) => emit_children(table, out),
    }
}

fn emit_scalar(tag: &str, value: &str, out: &mut String) {
    out.push_str("{\"type\": \"");
    out.push_str(tag);
    out.push_str("\", \"value\": \"");
    escape_into(value, out);
    out.push_str("\"}");
}

/// Floats honor the recorded rendering hints; non-finite values become the
/// literal strings `inf`, `-inf` and `nan`
fn format_float(float: &Float) -> String {
    let value = float.value;
    if value.is_infinite() {
        if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        }
    } else if value.is_nan() {
        "nan".to_string()
    } else if float.scientific {
        format!("{value:e}")
    } else if value == 0.0 {
        "0.0".to_string()
    } else {
        format!("{value:.precision$}", precision = float.precision)
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '\u{0008}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{000C}' => out.push_str("\\f"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            ch if ch.is_control() => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
}
