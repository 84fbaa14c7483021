//! Line sources feeding a [`Scanner`](crate::Scanner).
//!
//! The scanner pulls input one line at a time. A [`LineSource`] only has to
//! hand out the next line (without its terminator) and say whether the input
//! is exhausted; the scanner never closes or rewinds it.

use alloc::string::String;
use core::{convert::Infallible, fmt, str::Lines};

/// Produces successive lines of text on demand.
pub trait LineSource {
    /// Failure reported by the source. Only its message is kept by the
    /// scanner.
    type Error: fmt::Display;

    /// Appends the next line, without its `\n` or `\r\n` terminator, to the
    /// (empty) `buf`.
    ///
    /// Returns `Ok(false)` once the input is exhausted.
    fn read_line(&mut self, buf: &mut String) -> Result<bool, Self::Error>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    type Error = S::Error;

    fn read_line(&mut self, buf: &mut String) -> Result<bool, Self::Error> {
        (**self).read_line(buf)
    }
}

/// Lines of an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    lines: Lines<'a>,
}

impl<'a> StrSource<'a> {
    /// Lines of `text`, split on `\n` with a trailing `\r` removed.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { lines: text.lines() }
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl LineSource for StrSource<'_> {
    type Error = Infallible;

    fn read_line(&mut self, buf: &mut String) -> Result<bool, Self::Error> {
        match self.lines.next() {
            Some(line) => {
                buf.push_str(line);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Lines of any buffered reader. Input must be UTF-8; anything else is
/// reported as a read error.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

#[cfg(feature = "std")]
impl<R: std::io::BufRead> ReaderSource<R> {
    /// Reads lines from `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(feature = "std")]
impl<R: std::io::BufRead> LineSource for ReaderSource<R> {
    type Error = std::io::Error;

    fn read_line(&mut self, buf: &mut String) -> Result<bool, Self::Error> {
        if self.reader.read_line(buf)? == 0 {
            return Ok(false);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(true)
    }
}
