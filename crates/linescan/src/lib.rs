//! A line-oriented scanner for hand-written parsers of small languages.
//!
//! [`Scanner`] recognizes identifiers, integers, floats, quoted spans and
//! literal keywords or operators, skipping whitespace and comments between
//! them. It records the first error together with the offending line and
//! column and turns every later call into a no-op, so a parser can be written
//! without checking for errors after every token:
//!
//! ```rust
//! use linescan::Scanner;
//!
//! let mut sc = Scanner::from_text(
//!     r#"
//!     /* settings */
//!     name = "scanner" // inline comment
//!     ratio = 0.5
//!     "#,
//! );
//!
//! let mut pairs = Vec::new();
//! while !sc.is_end() {
//!     let key = sc.ident();
//!     sc.demand("=");
//!     let value = if sc.is("\"") { sc.string() } else { sc.float().to_string() };
//!     pairs.push((key, value));
//! }
//!
//! assert!(sc.err().is_none());
//! assert_eq!(pairs, [("name", "scanner"), ("ratio", "0.5")].map(|(k, v)| (k.to_string(), v.to_string())));
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod escape;
mod ident;
mod numbers;
mod options;
mod quote;
mod scanner;
mod source;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, ScanError};
pub use escape::{EscapeError, Escaped, Escaper, StandardEscaper};
pub use options::ScannerOptions;
pub use scanner::Scanner;
#[cfg(feature = "std")]
pub use source::ReaderSource;
pub use source::{LineSource, StrSource};
