//! Quoted spans: strings, characters and arbitrary delimiter pairs.
//!
//! A span is everything between a start and an end delimiter, including
//! whitespace and comment markers. With an [`Escaper`], escape sequences are
//! decoded one at a time; after every decoded escape the search for the end
//! delimiter starts over, since the escape may have hidden a delimiter (as
//! in `"a\"b"`).

use alloc::string::String;

use crate::{
    error::ErrorKind,
    escape::{EscapeError, Escaper, StandardEscaper},
    scanner::Scanner,
    source::LineSource,
};

/// How far `decode_segment` got on the current line.
enum Segment {
    /// The end delimiter starts this many bytes past the current position.
    Closed(usize),
    /// No end delimiter on this line.
    Open,
    /// An escape failed to decode; the error is latched.
    Failed,
}

impl<S: LineSource> Scanner<S> {
    /// Parses a string enclosed in double quotes, decoding
    /// [standard escapes](StandardEscaper).
    pub fn string(&mut self) -> String {
        self.quote("\"", "\"", Some(&StandardEscaper::quoted('"')))
    }

    /// Parses a single character enclosed in single quotes, decoding
    /// [standard escapes](StandardEscaper). Fails with `invalid character`
    /// unless the quotes hold exactly one code point.
    pub fn character(&mut self) -> char {
        let text = self.quote("'", "'", Some(&StandardEscaper::quoted('\'')));
        if self.err().is_some() {
            return '\0';
        }
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                self.fail_with(ErrorKind::InvalidCharacter);
                '\0'
            }
        }
    }

    /// Returns the text between `start` and `end`, which must both be on the
    /// current line.
    ///
    /// Fails with `'<start>' expected` if the next token does not begin with
    /// `start`, and with `'<end>' expected` if the line holds no `end` after
    /// it.
    ///
    /// ```
    /// # use linescan::Scanner;
    /// let mut sc = Scanner::from_text("a <<b /* c */>> d");
    /// sc.demand("a");
    /// assert_eq!(sc.quote("<<", ">>", None), "b /* c */");
    /// assert_eq!(sc.ident(), "d");
    /// ```
    pub fn quote(&mut self, start: &str, end: &str, esc: Option<&dyn Escaper>) -> String {
        if !self.is(start) {
            self.fail_with(ErrorKind::Expected(start.into()));
            return String::new();
        }
        self.set_pos(self.pos() + start.len());

        let mut out = String::new();
        match self.decode_segment(&mut out, end, esc, false) {
            Segment::Closed(len) => {
                out.push_str(&self.rest()[..len]);
                self.consume(len + end.len());
                out
            }
            Segment::Open => {
                self.set_pos(self.line_text().len());
                self.fail_with(ErrorKind::Expected(end.into()));
                String::new()
            }
            Segment::Failed => String::new(),
        }
    }

    /// Like [`quote`](Self::quote), but the span may cross lines. Every line
    /// break inside the span is returned as a single `'\n'`.
    ///
    /// Fails with `'<end>' expected` if the input ends before `end`.
    pub fn quote_multiline(&mut self, start: &str, end: &str, esc: Option<&dyn Escaper>) -> String {
        if !self.is(start) {
            self.fail_with(ErrorKind::Expected(start.into()));
            return String::new();
        }
        self.set_pos(self.pos() + start.len());

        let mut out = String::new();
        loop {
            match self.decode_segment(&mut out, end, esc, true) {
                Segment::Closed(len) => {
                    out.push_str(&self.rest()[..len]);
                    self.consume(len + end.len());
                    return out;
                }
                Segment::Open => {
                    out.push_str(self.rest());
                    out.push('\n');
                    if !self.next_line() {
                        self.fail_with(ErrorKind::Expected(end.into()));
                        return String::new();
                    }
                }
                Segment::Failed => return String::new(),
            }
        }
    }

    /// Decodes the escapes in front of the next `end` on the current line,
    /// appending the text before and including each decoded escape to `out`.
    ///
    /// With `whole_line`, escapes are also decoded when the line holds no
    /// `end`, so that the caller can take the rest of the line verbatim.
    fn decode_segment(&mut self, out: &mut String, end: &str, esc: Option<&dyn Escaper>, whole_line: bool) -> Segment {
        let mut close = self.rest().find(end);
        let Some(esc) = esc else {
            return close.map_or(Segment::Open, Segment::Closed);
        };

        let mut marker = esc.escape_index(self.rest());
        while let Some(at) = marker {
            let before_close = close.map_or(whole_line, |close| at < close);
            if !before_close {
                break;
            }
            out.push_str(&self.rest()[..at]);
            self.set_pos(self.pos() + at);
            match esc.unescape(self.rest(), out) {
                Ok(0) => {
                    self.fail_with(ErrorKind::Escape(EscapeError::Custom("empty escape sequence".into())));
                    return Segment::Failed;
                }
                Ok(len) => self.set_pos(self.pos() + len),
                Err(err) => {
                    self.fail_with(ErrorKind::Escape(err));
                    return Segment::Failed;
                }
            }
            marker = esc.escape_index(self.rest());
            close = self.rest().find(end);
        }
        close.map_or(Segment::Open, Segment::Closed)
    }
}
