//! Byte scanner with two-character history and bounded backtracking

use crate::error::{Error, ErrorKind, Pos, Result};
use crate::limits::Limits;

/// Most bytes a single [`Scanner::backtrack`] may rewind; the grammar never
/// needs more (four probe bytes for the datetime/number split).
pub const MAX_BACKTRACK: usize = 4;

/// Cursor over the input buffer.
///
/// Exposes the current byte plus the two previously read bytes, tracks
/// line/column state and records per-line lengths so a bounded rewind can
/// restore the position exactly. At end of input the current byte reads as
/// NUL once and [`has_more`](Scanner::has_more) turns false.
#[derive(Clone, Debug)]
pub struct Scanner {
    buf: Vec<u8>,
    cursor: usize,
    token: u8,
    prev: u8,
    prev_prev: u8,
    alive: bool,
    newline: bool,
    line: usize,
    col: usize,
    lines: Vec<usize>,
    max_lines: usize,
}

impl Scanner {
    /// Create a scanner over `buf` and read the first byte.
    pub fn new(buf: Vec<u8>, limits: &Limits) -> Self {
        let mut scanner = Self {
            buf,
            cursor: 0,
            token: 0,
            prev: 0,
            prev_prev: 0,
            alive: true,
            newline: true,
            line: 0,
            col: 0,
            lines: Vec::new(),
            max_lines: limits.max_num_lines,
        };
        scanner.advance();
        scanner
    }

    /// Read the next byte, shifting the two-byte history.
    ///
    /// Returns false once end of input has been consumed; the history still
    /// shifts so literal checks drain to NUL.
    pub fn advance(&mut self) -> bool {
        self.prev_prev = self.prev;
        self.prev = self.token;
        if !self.alive {
            self.token = 0;
            return false;
        }
        if self.cursor < self.buf.len() {
            self.token = self.buf[self.cursor];
        } else {
            self.token = 0;
            self.alive = false;
        }
        self.cursor += 1;
        // a non-blank byte after the newline means we left the line start
        if self.newline
            && self.prev != 0
            && self.prev != b' '
            && self.prev != b'\t'
            && self.prev != b'\n'
        {
            self.newline = false;
        }
        if self.token == b'\n' {
            self.newline = true;
        }
        if self.prev == b'\n' {
            if self.line < self.max_lines {
                if self.line < self.lines.len() {
                    self.lines[self.line] = self.col;
                } else {
                    self.lines.push(self.col);
                }
            }
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        true
    }

    pub const fn current(&self) -> u8 {
        self.token
    }

    pub const fn previous(&self) -> u8 {
        self.prev
    }

    pub const fn prev_previous(&self) -> u8 {
        self.prev_prev
    }

    /// True until end of input has been consumed
    pub const fn has_more(&self) -> bool {
        self.alive
    }

    /// True while only blanks have been read since the last newline
    pub const fn at_line_start(&self) -> bool {
        self.newline
    }

    pub fn position(&self) -> Pos {
        Pos::new(self.cursor, self.line as u32 + 1, self.col as u32)
    }

    /// Lines consumed so far (0-indexed internally)
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Rewind by `n` bytes.
    ///
    /// Internally moves the cursor back `n + 2` bytes and re-advances twice
    /// so the two-byte history is coherent. Failure here is a scanner misuse
    /// bug, not a parse diagnostic: the grammar never rewinds more than
    /// [`MAX_BACKTRACK`] bytes nor past the buffer start.
    pub fn backtrack(&mut self, n: usize) -> Result<()> {
        let mut rewind = n + 2;
        if n == 0 || n > MAX_BACKTRACK || self.cursor <= rewind {
            return Err(Error::with_message(
                ErrorKind::Unknown,
                self.position(),
                format!("cannot rewind scanner by {n}"),
            ));
        }
        self.cursor -= rewind;
        self.alive = true;
        let mut col = self.col;
        while self.line > 0 && rewind > col {
            rewind -= col;
            self.line -= 1;
            col = self.lines.get(self.line).copied().unwrap_or(0);
        }
        self.col = col.saturating_sub(rewind);
        self.advance();
        self.advance();
        Ok(())
    }
}
