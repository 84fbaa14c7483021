//! Escape sequence decoding for quoted spans.
//!
//! [`Scanner::quote`](crate::Scanner::quote) and friends take an optional
//! [`Escaper`]. The escaper tells the scanner where the next escape sequence
//! starts and decodes one sequence at a time, so the scanner can keep
//! searching for the closing delimiter after every decoded escape.
//!
//! [`StandardEscaper`] implements the backslash escapes familiar from C-like
//! string literals:
//!
//! | sequence        | decodes to                              |
//! |-----------------|-----------------------------------------|
//! | `\a \b \f \v`   | BEL, BS, FF, VT                         |
//! | `\n \r \t`      | LF, CR, TAB                             |
//! | `\\`            | `\`                                     |
//! | `\"` or `\'`    | the configured quote, and only that one |
//! | `\xHH`          | an ASCII character (`HH` <= `7F`)       |
//! | `\NNN`          | an ASCII character, three octal digits  |
//! | `\uHHHH`        | a Unicode scalar value                  |
//! | `\UHHHHHHHH`    | a Unicode scalar value                  |
//!
//! # Errors
//!
//! Unknown escapes, malformed digits, truncated sequences, surrogates and
//! byte escapes above `7F` (which would not be valid UTF-8 on their own) are
//! reported as [`EscapeError`]s.

use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use thiserror::Error;

/// Why an escape sequence could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EscapeError {
    #[error("invalid escape sequence: truncated")]
    Truncated,
    #[error("invalid escape sequence '\\{0}'")]
    Unknown(char),
    #[error("invalid escape sequence: unexpected quote '{0}'")]
    UnexpectedQuote(char),
    #[error("invalid hex digit '{0}' in escape sequence")]
    InvalidHexDigit(char),
    #[error("invalid octal digit '{0}' in escape sequence")]
    InvalidOctalDigit(char),
    #[error("byte escape {0:#04x} is not an ASCII character")]
    NonAsciiByte(u32),
    #[error("invalid unicode code point {0:#x}")]
    InvalidCodePoint(u32),
    /// Free-form failure for caller-defined escapers.
    #[error("{0}")]
    Custom(String),
}

/// Locates and decodes escape sequences inside a quoted span.
pub trait Escaper {
    /// Returns the byte offset of the first escape marker in `text`.
    fn escape_index(&self, text: &str) -> Option<usize>;

    /// Decodes exactly one escape sequence at the start of `text`, pushing
    /// its replacement onto `out` and returning the number of bytes consumed.
    ///
    /// On error nothing should have been pushed.
    fn unescape(&self, text: &str, out: &mut String) -> Result<usize, EscapeError>;
}

impl<E: Escaper + ?Sized> Escaper for &E {
    fn escape_index(&self, text: &str) -> Option<usize> {
        (**self).escape_index(text)
    }

    fn unescape(&self, text: &str, out: &mut String) -> Result<usize, EscapeError> {
        (**self).unescape(text, out)
    }
}

/// Backslash escapes with one optional escapable quote character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardEscaper {
    quote: Option<char>,
}

impl StandardEscaper {
    /// An escaper that accepts no quote escapes at all.
    pub const fn new() -> Self {
        Self { quote: None }
    }

    /// An escaper that accepts `\` followed by `quote` (which should be `"`
    /// or `'`).
    pub const fn quoted(quote: char) -> Self {
        Self { quote: Some(quote) }
    }

    #[must_use]
    pub fn quote(&self) -> Option<char> {
        self.quote
    }

    /// Encodes `text` so that decoding it with this escaper yields `text`
    /// again. Backslashes, the configured quote and control characters are
    /// escaped; everything else is copied through.
    #[must_use]
    pub fn escape(&self, text: &str) -> String {
        self.escaped(text).to_string()
    }

    /// Like [`escape`](Self::escape), without allocating:
    ///
    /// ```
    /// # use linescan::StandardEscaper;
    /// let esc = StandardEscaper::quoted('"');
    /// assert_eq!(format!("\"{}\"", esc.escaped("say \"hi\"\n")), r#""say \"hi\"\n""#);
    /// ```
    #[must_use]
    pub fn escaped<'a>(&self, text: &'a str) -> Escaped<'a> {
        Escaped { quote: self.quote, text }
    }
}

/// Display adapter returned by [`StandardEscaper::escaped`].
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a> {
    quote: Option<char>,
    text: &'a str,
}

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.text.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\u{7}' => f.write_str("\\a")?,
                '\u{8}' => f.write_str("\\b")?,
                '\u{b}' => f.write_str("\\v")?,
                '\u{c}' => f.write_str("\\f")?,
                c if Some(c) == self.quote => {
                    f.write_char('\\')?;
                    f.write_char(c)?;
                }
                c if c.is_ascii_control() => write!(f, "\\x{:02x}", c as u32)?,
                c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

impl Escaper for StandardEscaper {
    fn escape_index(&self, text: &str) -> Option<usize> {
        text.find('\\')
    }

    fn unescape(&self, text: &str, out: &mut String) -> Result<usize, EscapeError> {
        let mut chars = text.chars();
        let first = chars.next().ok_or(EscapeError::Truncated)?;
        if first != '\\' {
            out.push(first);
            return Ok(first.len_utf8());
        }

        let kind = chars.next().ok_or(EscapeError::Truncated)?;
        let (ch, len) = match kind {
            'a' => ('\u{7}', 2),
            'b' => ('\u{8}', 2),
            'f' => ('\u{c}', 2),
            'n' => ('\n', 2),
            'r' => ('\r', 2),
            't' => ('\t', 2),
            'v' => ('\u{b}', 2),
            '\\' => ('\\', 2),
            '\'' | '"' if Some(kind) == self.quote => (kind, 2),
            '\'' | '"' => return Err(EscapeError::UnexpectedQuote(kind)),
            'x' => (ascii(digits(&text[2..], 2, 16)?)?, 4),
            '0'..='7' => (ascii(digits(&text[1..], 3, 8)?)?, 4),
            'u' => (scalar(digits(&text[2..], 4, 16)?)?, 6),
            'U' => (scalar(digits(&text[2..], 8, 16)?)?, 10),
            other => return Err(EscapeError::Unknown(other)),
        };
        out.push(ch);
        Ok(len)
    }
}

/// Reads exactly `count` digits in `radix` from the start of `text`.
fn digits(text: &str, count: usize, radix: u32) -> Result<u32, EscapeError> {
    let mut value = 0u32;
    let mut seen = 0;
    for c in text.chars().take(count) {
        let Some(d) = c.to_digit(radix) else {
            return Err(if radix == 8 {
                EscapeError::InvalidOctalDigit(c)
            } else {
                EscapeError::InvalidHexDigit(c)
            });
        };
        value = value * radix + d;
        seen += 1;
    }
    if seen < count {
        return Err(EscapeError::Truncated);
    }
    Ok(value)
}

fn ascii(value: u32) -> Result<char, EscapeError> {
    if value > 0x7f {
        return Err(EscapeError::NonAsciiByte(value));
    }
    scalar(value)
}

fn scalar(value: u32) -> Result<char, EscapeError> {
    char::from_u32(value).ok_or(EscapeError::InvalidCodePoint(value))
}
