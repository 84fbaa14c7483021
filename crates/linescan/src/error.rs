use alloc::string::String;

use thiserror::Error;

use crate::escape::EscapeError;

/// The first failure recorded by a [`Scanner`](crate::Scanner).
///
/// A `ScanError` captures a copy of the line that was being scanned, its
/// 1-based number and the byte column of the failure. It is built once, when
/// the scanner latches its first failure, and is only read afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at {line_number}:{column}")]
pub struct ScanError {
    pub(crate) kind: ErrorKind,
    pub(crate) line: String,
    pub(crate) line_number: usize,
    pub(crate) column: usize,
}

/// What went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A required literal or closing delimiter was not found.
    #[error("'{0}' expected")]
    Expected(String),
    #[error("identifier expected")]
    IdentifierExpected,
    #[error("integer expected")]
    IntegerExpected,
    #[error("float expected")]
    FloatExpected,
    /// A character literal did not decode to exactly one code point.
    #[error("invalid character")]
    InvalidCharacter,
    /// A block comment opener without a closer before end of input.
    #[error("unmatched '{0}'")]
    UnterminatedComment(String),
    #[error("{0}")]
    Escape(#[from] EscapeError),
    /// The line source failed to produce the next line.
    #[error("read error: {0}")]
    Source(String),
    /// A failure reported by the caller through `fail`/`fail_fmt`.
    #[error("{0}")]
    Message(String),
}

impl ScanError {
    pub(crate) fn new(kind: ErrorKind, line: &str, line_number: usize, column: usize) -> Self {
        Self {
            kind,
            line: line.into(),
            line_number,
            column,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The error message without position information.
    #[must_use]
    pub fn message(&self) -> String {
        use alloc::string::ToString;
        self.kind.to_string()
    }

    /// The line being scanned when the error occurred. Empty if the error was
    /// raised after the end of input.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// 1-based number of [`line`](Self::line), or 0 if no line was read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Byte offset of the failure within [`line`](Self::line).
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Renders the message, the offending line and a caret under the failing
    /// column:
    ///
    /// ```text
    /// Line 3: 'x' expected
    /// let y = 1;
    ///     ^
    /// ```
    ///
    /// Tabs in the line prefix are repeated in the padding so the caret lines
    /// up in a terminal.
    #[must_use]
    pub fn position_indicator(&self) -> String {
        let mut out = alloc::format!("Line {}: {}\n{}\n", self.line_number, self.kind, self.line);
        let prefix = self
            .line
            .get(..self.column)
            .unwrap_or(self.line.as_str());
        out.extend(prefix.chars().map(|c| if c == '\t' { '\t' } else { ' ' }));
        out.push('^');
        out
    }
}
