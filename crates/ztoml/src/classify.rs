//! Byte classification predicates for the TOML grammar
//!
//! Pure functions over a single byte, matching TOML 1.0.0 character classes.

pub const fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

pub const fn is_newline(b: u8) -> bool {
    b == b'\n'
}

pub const fn is_return(b: u8) -> bool {
    b == b'\r'
}

pub const fn is_comment_start(b: u8) -> bool {
    b == b'#'
}

pub const fn is_equal(b: u8) -> bool {
    b == b'='
}

pub const fn is_escape(b: u8) -> bool {
    b == b'\\'
}

pub const fn is_basic_string_start(b: u8) -> bool {
    b == b'"'
}

pub const fn is_literal_string_start(b: u8) -> bool {
    b == b'\''
}

pub const fn is_table_start(b: u8) -> bool {
    b == b'['
}

pub const fn is_table_end(b: u8) -> bool {
    b == b']'
}

pub const fn is_inline_table_start(b: u8) -> bool {
    b == b'{'
}

pub const fn is_inline_table_end(b: u8) -> bool {
    b == b'}'
}

pub const fn is_inline_table_separator(b: u8) -> bool {
    b == b','
}

pub const fn is_dot(b: u8) -> bool {
    b == b'.'
}

pub const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Hex letters only; callers combine with [`is_digit`]
pub const fn is_hex_digit(b: u8) -> bool {
    matches!(b, b'A'..=b'F' | b'a'..=b'f')
}

pub const fn is_number_start(b: u8) -> bool {
    b == b'+' || b == b'-' || is_digit(b)
}

/// `A-Z a-z 0-9 _ -`
pub const fn is_bare_key(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Control bytes forbidden unescaped in single-line strings and comments
pub const fn is_control(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0A..=0x1F | 0x7F)
}

/// Control bytes forbidden in multi-line basic strings; `\n` is allowed
pub const fn is_control_multi(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F | 0x7F)
}

/// Control bytes forbidden in literal strings; `\t` is allowed
pub const fn is_control_literal(b: u8) -> bool {
    (b <= 0x1F && b != 0x09 && b != 0x0A) || b == 0x7F
}

pub const fn is_decimal_point(b: u8) -> bool {
    b == b'.'
}

pub const fn is_underscore(b: u8) -> bool {
    b == b'_'
}

pub const fn is_array_start(b: u8) -> bool {
    b == b'['
}

pub const fn is_array_end(b: u8) -> bool {
    b == b']'
}

pub const fn is_array_separator(b: u8) -> bool {
    b == b','
}

/// Context-dependent number terminator; `end` is supplied by the caller
/// (e.g. `b"# \n"` at top level, `b"#,] \n"` inside an array).
pub fn is_number_end(b: u8, end: &[u8]) -> bool {
    end.contains(&b)
}
