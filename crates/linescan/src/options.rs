/// Configuration options for the [`Scanner`](crate::Scanner).
///
/// These options control which comment forms the scanner skips between
/// tokens. Whitespace is always skipped.
///
/// # Default
///
/// C-style comments: `//` to the end of the line and `/* ... */` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Marker that starts a comment running to the end of the line.
    ///
    /// # Examples
    ///
    /// ```
    /// # use linescan::{Scanner, ScannerOptions, StrSource};
    /// let opts = ScannerOptions { line_comment: Some("#"), ..Default::default() };
    /// let mut sc = Scanner::with_options(StrSource::new("# setting\nname"), opts);
    /// assert_eq!(sc.ident(), "name");
    /// ```
    ///
    /// # Default
    ///
    /// `Some("//")`
    pub line_comment: Option<&'static str>,

    /// Opening and closing markers of a block comment. Block comments may
    /// span lines and do not nest.
    ///
    /// # Default
    ///
    /// `Some(("/*", "*/"))`
    pub block_comment: Option<(&'static str, &'static str)>,
}

impl ScannerOptions {
    /// Options that skip whitespace only.
    pub const fn no_comments() -> Self {
        Self {
            line_comment: None,
            block_comment: None,
        }
    }
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            line_comment: Some("//"),
            block_comment: Some(("/*", "*/")),
        }
    }
}
