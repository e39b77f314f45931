//! Recursive-descent TOML parser
//!
//! The driver interprets each non-blank line as a comment, a table header,
//! an array-table header or a key-value pair, threading the active table
//! through the parse. Value and key grammars live in the submodules.

pub(crate) mod datetime;
pub(crate) mod key;
pub(crate) mod number;
pub(crate) mod string;
pub(crate) mod value;

use crate::builder;
use crate::classify;
use crate::error::{Error, ErrorKind, Pos, Result};
use crate::key::{Key, KeyKind};
use crate::limits::Limits;
use crate::scanner::Scanner;

/// Number terminators at top level
const LINE_END: &[u8] = b"# \r\n";

/// TOML document parser.
///
/// Consumes an in-memory byte buffer and produces the document tree, or the
/// first error with its position. The active table is tracked as a path and
/// re-resolved per line, so header order never leaves dangling references.
#[derive(Debug)]
pub struct Parser {
    scanner: Scanner,
    limits: Limits,
    root: Key,
    active: Vec<String>,
}

impl Parser {
    pub fn new(buf: Vec<u8>) -> Self {
        Self::with_limits(buf, Limits::default())
    }

    pub fn with_limits(buf: Vec<u8>, limits: Limits) -> Self {
        Self {
            scanner: Scanner::new(buf, &limits),
            limits,
            root: Key::root(),
            active: Vec::new(),
        }
    }

    /// Parse the whole document and hand the tree to the caller
    pub fn parse(mut self) -> Result<Key> {
        while self.scanner.has_more() {
            self.parse_line()?;
            if self.scanner.line() >= self.limits.max_num_lines {
                return Err(Error::new(
                    ErrorKind::BufferOverflow {
                        max: self.limits.max_num_lines,
                    },
                    self.scanner.position(),
                ));
            }
        }
        Ok(self.root)
    }

    /// One dispatch step: comment, blanks, header or key-value
    fn parse_line(&mut self) -> Result<()> {
        let b = self.scanner.current();
        if classify::is_comment_start(b) {
            return parse_comment(&mut self.scanner);
        }
        if classify::is_whitespace(b) {
            skip_whitespace(&mut self.scanner);
            return Ok(());
        }
        if at_newline(&mut self.scanner)? {
            self.scanner.advance();
            return Ok(());
        }
        if classify::is_table_start(b) {
            self.scanner.advance();
            return self.parse_header();
        }
        // a key may only start a line; anything else mid-line is junk
        if self.scanner.previous() == 0
            || classify::is_newline(self.scanner.previous())
            || (classify::is_whitespace(self.scanner.previous()) && self.scanner.at_line_start())
        {
            return self.parse_key_value();
        }
        Err(Error::with_message(
            ErrorKind::Decode,
            self.scanner.position(),
            format!("unexpected character {:?}", char::from(b)),
        ))
    }

    /// `[path]` or `[[path]]`; the result becomes the active table
    fn parse_header(&mut self) -> Result<()> {
        let limits = self.limits;
        if classify::is_table_start(self.scanner.current()) {
            self.scanner.advance();
            let path = key::parse_array_table_path(&mut self.scanner, &limits)?;
            let pos = self.scanner.position();
            let table = builder::attach_path(
                &mut self.root,
                &path,
                KeyKind::TableBranch,
                KeyKind::ArrayTable,
                &limits,
                pos,
            )?;
            builder::push_element(table, &limits, pos)?;
            self.active = path;
        } else {
            let path = key::parse_table_path(&mut self.scanner, &limits)?;
            let pos = self.scanner.position();
            builder::attach_path(
                &mut self.root,
                &path,
                KeyKind::TableBranch,
                KeyKind::TableLeaf,
                &limits,
                pos,
            )?;
            self.active = path;
        }
        Ok(())
    }

    /// `key = value` under the active table
    fn parse_key_value(&mut self) -> Result<()> {
        let limits = self.limits;
        let path = key::parse_key_path(&mut self.scanner, &limits)?;
        let parsed = value::parse_value(&mut self.scanner, &limits, LINE_END)?;
        let pos = self.scanner.position();
        let active = resolve_active(&mut self.root, &self.active, pos)?;
        let leaf = builder::attach_path(
            active,
            &path,
            KeyKind::KeyBranch,
            KeyKind::KeyLeaf,
            &limits,
            pos,
        )?;
        builder::install_value(leaf, parsed);
        skip_whitespace(&mut self.scanner);
        Ok(())
    }
}

/// Walk the active-table path down from the root.
///
/// An array-table along the path stands for its current last element. The
/// path was installed by a header parse, so a miss is a bug, not bad input.
fn resolve_active<'a>(root: &'a mut Key, path: &[String], pos: Pos) -> Result<&'a mut Key> {
    let mut node = root;
    for segment in path {
        if node.kind == KeyKind::ArrayTable {
            node = node.elements.last_mut().ok_or_else(|| {
                Error::with_message(ErrorKind::Unknown, pos, "array table without elements")
            })?;
        }
        node = node.children.get_mut(segment).ok_or_else(|| {
            Error::with_message(ErrorKind::Unknown, pos, "active table disappeared")
        })?;
    }
    Ok(node)
}

/// Skip ASCII blanks
pub(crate) fn skip_whitespace(scanner: &mut Scanner) {
    while scanner.has_more() && classify::is_whitespace(scanner.current()) {
        scanner.advance();
    }
}

/// True when the scanner sits on a line ending.
///
/// A `\r\n` pair counts as one: the `\r` is consumed and the scanner is left
/// on the `\n`. A lone `\r` is put back and reads as a control byte.
pub(crate) fn at_newline(scanner: &mut Scanner) -> Result<bool> {
    if classify::is_newline(scanner.current()) {
        return Ok(true);
    }
    if classify::is_return(scanner.current()) {
        scanner.advance();
        if classify::is_newline(scanner.current()) {
            return Ok(true);
        }
        scanner.backtrack(1)?;
    }
    Ok(false)
}

/// Consume `#` through end of line; comment bytes may not be control bytes
pub(crate) fn parse_comment(scanner: &mut Scanner) -> Result<()> {
    while scanner.has_more() {
        scanner.advance();
        if at_newline(scanner)? {
            scanner.advance();
            return Ok(());
        }
        if classify::is_control(scanner.current()) {
            return Err(Error::with_message(
                ErrorKind::Decode,
                scanner.position(),
                "control character in comment",
            ));
        }
    }
    Ok(())
}
