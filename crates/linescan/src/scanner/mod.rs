//! Scanner: owner of the current line and the error latch.
//!
//! What it does
//! - Pulls input from a [`LineSource`] one line at a time and keeps only the
//!   current line, as an owned `String` addressed by a byte offset.
//! - Decodes the code point at the offset (`ch`, `ch_len`). The first code
//!   point of every new line is a synthetic `'\n'` of width zero, so a line
//!   break always reads as whitespace.
//! - Skips whitespace, line comments and block comments after every consuming
//!   operation, so between calls the scanner sits on the first code point of
//!   the next token.
//!
//! Invariants
//! - Between public calls, `ch` is never whitespace and never starts a
//!   comment.
//! - Once the latch leaves `Scanning`, `line` is empty, `pos` is 0 and `ch` is
//!   `'\0'`; all recognizers return their zero value.
//! - `Failed` is write-once. `Ended` can still turn into `Failed`, which is
//!   how "identifier expected" gets reported at end of input.
//! - Tokens are returned as owned copies; nothing borrows a line across a
//!   line transition.

use alloc::string::{String, ToString};
use core::fmt;

use tracing::{debug, trace};

use crate::{
    error::{ErrorKind, ScanError},
    options::ScannerOptions,
    source::{LineSource, StrSource},
};


/// Scanning state. Checked at the entry of every recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Latch {
    Scanning,
    /// The source is exhausted. Not an error on its own.
    Ended,
    Failed(ScanError),
}

/// A scanner over a line-oriented source.
///
/// The scanner ignores whitespace and comments, except to separate tokens.
/// Once it encounters an error, every recognizer returns its zero value and
/// the first error stays available through [`err`](Self::err), so a parser
/// can run to completion and check for failure once at the end.
///
/// ```
/// use linescan::Scanner;
///
/// let mut sc = Scanner::from_text("size = 12 // bytes");
/// assert_eq!(sc.ident(), "size");
/// sc.demand("=");
/// assert_eq!(sc.int(), 12);
/// assert!(sc.is_end());
/// assert!(sc.err().is_none());
/// ```
pub struct Scanner<S> {
    source: S,
    options: ScannerOptions,

    // Current line
    line: String,
    pos: usize,
    line_number: usize,

    // Code point at `pos`
    ch: char,
    ch_len: usize,

    latch: Latch,
}

impl<'a> Scanner<StrSource<'a>> {
    /// Creates a scanner over in-memory text.
    #[must_use]
    pub fn from_text(text: &'a str) -> Self {
        Self::new(StrSource::new(text))
    }
}

#[cfg(feature = "std")]
impl<R: std::io::BufRead> Scanner<crate::source::ReaderSource<R>> {
    /// Creates a scanner reading lines from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Self::new(crate::source::ReaderSource::new(reader))
    }
}

impl<S: LineSource> Scanner<S> {
    /// Creates a scanner with the default C-style comments.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ScannerOptions::default())
    }

    /// Creates a scanner that skips the comment forms given in `options`.
    pub fn with_options(source: S, options: ScannerOptions) -> Self {
        let mut scanner = Self {
            source,
            options,
            line: String::new(),
            pos: 0,
            line_number: 0,
            ch: '\0',
            ch_len: 0,
            latch: Latch::Scanning,
        };
        scanner.skip_space();
        scanner
    }

    /// Returns the source, dropping any unread part of the current line.
    pub fn into_source(self) -> S {
        self.source
    }

    // --------------------------------------------------------------------
    // Advance
    // --------------------------------------------------------------------

    /// Steps over the current code point and decodes the next one, pulling a
    /// new line when the current one is used up.
    fn advance(&mut self) {
        self.pos += self.ch_len;
        self.ch = '\0';
        self.ch_len = 0;
        if !self.is_scanning() {
            return;
        }
        if self.pos < self.line.len() {
            let (ch, len) = bstr::decode_utf8(&self.line.as_bytes()[self.pos..]);
            self.ch = ch.unwrap_or('\u{FFFD}');
            self.ch_len = len;
        } else {
            self.pull_line();
        }
    }

    /// Re-decodes at `pos` without stepping.
    fn update(&mut self) {
        self.ch_len = 0;
        self.advance();
    }

    fn pull_line(&mut self) {
        self.line.clear();
        self.pos = 0;
        match self.source.read_line(&mut self.line) {
            Ok(true) => {
                self.line_number += 1;
                self.ch = '\n';
                self.ch_len = 0;
                trace!(line = self.line_number, len = self.line.len(), "line");
            }
            Ok(false) => {
                debug!(lines = self.line_number, "end of input");
                self.latch = Latch::Ended;
                self.reset_view();
            }
            Err(err) => {
                self.line.clear();
                self.fail_with(ErrorKind::Source(err.to_string()));
            }
        }
    }

    /// Skips whitespace, line comments and block comments.
    fn skip_space(&mut self) {
        'skip: loop {
            self.update();
            while self.ch.is_whitespace() {
                self.advance();
            }

            if self.options.line_comment.is_some_and(|marker| self.is(marker)) {
                self.pos = self.line.len();
                continue;
            }

            let Some((open, close)) = self.options.block_comment else {
                return;
            };
            if !self.is(open) {
                return;
            }

            let unmatched = ScanError::new(
                ErrorKind::UnterminatedComment(open.into()),
                &self.line,
                self.line_number,
                self.pos,
            );
            self.pos += open.len();
            while self.is_scanning() {
                if let Some(end) = self.rest().find(close) {
                    self.pos += end + close.len();
                    continue 'skip;
                }
                self.pos = self.line.len();
                self.update();
            }
            if self.latch == Latch::Ended {
                debug!(line = unmatched.line_number, column = unmatched.column, "unmatched block comment");
                self.latch = Latch::Failed(unmatched);
            }
            return;
        }
    }

    // --------------------------------------------------------------------
    // Crate-internal helpers for the recognizers
    // --------------------------------------------------------------------

    /// Unconsumed text of the current line, starting at the current token.
    pub(crate) fn rest(&self) -> &str {
        &self.line[self.pos..]
    }

    pub(crate) fn is_scanning(&self) -> bool {
        matches!(self.latch, Latch::Scanning)
    }

    /// Steps over `len` bytes of the current line and skips to the next
    /// token.
    pub(crate) fn consume(&mut self, len: usize) {
        self.pos += len;
        self.skip_space();
    }

    /// Moves within the current line without skipping anything.
    pub(crate) fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn line_text(&self) -> &str {
        &self.line
    }

    /// Moves to the start of the next line. Returns `false` if there is none
    /// or the source failed.
    pub(crate) fn next_line(&mut self) -> bool {
        self.pos = self.line.len();
        self.update();
        self.is_scanning()
    }

    /// Latches `kind` at the current position unless a failure is already
    /// latched.
    pub(crate) fn fail_with(&mut self, kind: ErrorKind) {
        if let Latch::Failed(_) = self.latch {
            return;
        }
        debug!(line = self.line_number, column = self.pos, error = %kind, "scan failed");
        let err = ScanError::new(kind, &self.line, self.line_number, self.pos);
        self.latch = Latch::Failed(err);
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.line.clear();
        self.pos = 0;
        self.ch = '\0';
        self.ch_len = 0;
    }

    // --------------------------------------------------------------------
    // Code points
    // --------------------------------------------------------------------

    /// Returns the next code point without advancing. Never whitespace;
    /// `'\0'` once the scanner has ended or failed.
    #[must_use]
    pub fn peek(&self) -> char {
        self.ch
    }

    /// Returns the next code point and advances past it. Never whitespace;
    /// `'\0'` once the scanner has ended or failed.
    pub fn next_char(&mut self) -> char {
        if !self.is_scanning() {
            return '\0';
        }
        let ch = self.ch;
        self.consume(self.ch_len);
        ch
    }

    // --------------------------------------------------------------------
    // Literals
    // --------------------------------------------------------------------

    /// Returns `true` if the input continues with `lit`, without advancing.
    /// `lit` must not contain whitespace.
    #[must_use]
    pub fn is(&self, lit: &str) -> bool {
        self.is_scanning() && self.rest().starts_with(lit)
    }

    /// Consumes `lit` if the input continues with it. The scanner does not
    /// move if `eat` returns `false`.
    pub fn eat(&mut self, lit: &str) -> bool {
        if !self.is(lit) {
            return false;
        }
        self.consume(lit.len());
        true
    }

    /// Consumes `lit`, or fails with `'<lit>' expected`.
    pub fn demand(&mut self, lit: &str) {
        if !self.eat(lit) {
            self.fail_with(ErrorKind::Expected(lit.into()));
        }
    }

    // --------------------------------------------------------------------
    // Failures
    // --------------------------------------------------------------------

    /// Records a failure at the current position, unless one is already
    /// recorded. Clears the current token afterwards.
    pub fn fail(&mut self, msg: &str) {
        self.fail_with(ErrorKind::Message(msg.into()));
    }

    /// Like [`fail`](Self::fail), with a formatted message:
    ///
    /// ```
    /// # use linescan::Scanner;
    /// let mut sc = Scanner::from_text("x");
    /// sc.fail_fmt(format_args!("unknown key '{}'", "x"));
    /// assert_eq!(sc.err().unwrap().message(), "unknown key 'x'");
    /// ```
    pub fn fail_fmt(&mut self, args: fmt::Arguments<'_>) {
        if let Latch::Failed(_) = self.latch {
            return;
        }
        self.fail_with(ErrorKind::Message(alloc::fmt::format(args)));
    }

    /// The first error, if any. Reaching the end of input is not an error.
    #[must_use]
    pub fn err(&self) -> Option<&ScanError> {
        match &self.latch {
            Latch::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` at the end of input or after an error.
    #[must_use]
    pub fn is_end(&self) -> bool {
        !self.is_scanning()
    }

    /// Finishes scanning, yielding the first error if there was one.
    pub fn into_result(self) -> Result<(), ScanError> {
        match self.latch {
            Latch::Failed(err) => Err(err),
            _ => Ok(()),
        }
    }

    /// Number of the current line, starting at 1. Keeps the last line's
    /// number after the end of input.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Byte offset of the next token in the current line.
    #[must_use]
    pub fn column(&self) -> usize {
        self.pos
    }
}

impl<S> fmt::Debug for Scanner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("line", &self.line)
            .field("pos", &self.pos)
            .field("line_number", &self.line_number)
            .field("ch", &self.ch)
            .field("latch", &self.latch)
            .finish_non_exhaustive()
    }
}
