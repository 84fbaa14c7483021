use alloc::string::{String, ToString};

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::{error::ErrorKind, scanner::Scanner, source::LineSource};

/// General category `L`. Narrower than `char::is_alphabetic`, which also
/// admits letter numbers, circled letters and combining marks.
pub(crate) fn is_letter(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphabetic();
    }
    c.general_category_group() == GeneralCategoryGroup::Letter
}

/// General category `Nd`. Superscripts, fractions and roman numerals are not
/// digits.
pub(crate) fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    c.general_category() == GeneralCategory::DecimalNumber
}

fn is_ident_start(c: char) -> bool {
    c == '_' || is_letter(c)
}

/// Letters, `_` and anything in general category `N`.
fn is_ident_continue(c: char) -> bool {
    c == '_' || is_letter(c) || c.general_category_group() == GeneralCategoryGroup::Number
}

impl<S: LineSource> Scanner<S> {
    /// Returns `true` if the next token is an identifier: a letter or `_`
    /// followed by letters, digits and `_`.
    #[must_use]
    pub fn is_ident(&self) -> bool {
        is_ident_start(self.peek())
    }

    /// Returns the next identifier without advancing, or `""` if the next
    /// token is not an identifier.
    #[must_use]
    pub fn peek_ident(&self) -> &str {
        if !self.is_ident() {
            return "";
        }
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|&(_, c)| !is_ident_continue(c))
            .map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    }

    /// Consumes and returns the next identifier, or fails with
    /// `identifier expected`.
    pub fn ident(&mut self) -> String {
        let ident = self.peek_ident().to_string();
        if ident.is_empty() {
            self.fail_with(ErrorKind::IdentifierExpected);
            return ident;
        }
        self.consume(ident.len());
        ident
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{ErrorKind, Scanner};

    #[rstest]
    #[case("a", "a")]
    #[case("aa", "aa")]
    #[case("a1", "a1")]
    #[case("_1", "_1")]
    #[case("  a  ", "a")]
    #[case("a(", "a")]
    #[case("über_größe2", "über_größe2")]
    #[case("x\u{0663}", "x\u{0663}")]
    #[case("aⅧ²", "aⅧ²")]
    #[case("e\u{301}", "e")]
    #[case("aⒶ", "a")]
    fn accepts(#[case] input: &str, #[case] expected: &str) {
        let mut sc = Scanner::from_text(input);
        assert!(sc.is_ident());
        assert_eq!(sc.peek_ident(), expected);
        assert_eq!(sc.ident(), expected);
        assert_eq!(sc.err(), None, "input {input:?}");
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case(".")]
    #[case("(")]
    #[case("Ⅷ")]
    #[case("Ⓐ")]
    #[case("\u{0663}")]
    fn rejects(#[case] input: &str) {
        let mut sc = Scanner::from_text(input);
        assert!(!sc.is_ident());
        assert_eq!(sc.peek_ident(), "");
        assert_eq!(sc.ident(), "");
        let err = sc.err().expect("identifier error");
        assert_eq!(err.kind(), &ErrorKind::IdentifierExpected);
    }

    #[rstest]
    #[case("a", &["a"])]
    #[case("a b", &["a", "b"])]
    #[case("            a    b", &["a", "b"])]
    #[case("a\n\t\t  b", &["a", "b"])]
    #[case("a // comment", &["a"])]
    #[case("a /* comment */ b", &["a", "b"])]
    #[case("a\n\t\t/* multi\n\t\tline\n\t\tcomment */\n\t\tb", &["a", "b"])]
    #[case("a /**/ /*\n\t\t\n\t\t*/ /**/ b", &["a", "b"])]
    fn whitespace_and_comments_separate_identifiers(#[case] input: &str, #[case] expected: &[&str]) {
        let mut sc = Scanner::from_text(input);
        for want in expected {
            assert_eq!(sc.ident(), *want, "input {input:?}");
        }
        assert!(sc.is_end());
        assert_eq!(sc.err(), None);
    }

    #[test]
    fn combining_mark_ends_identifier() {
        let mut sc = Scanner::from_text("cafe\u{301}");
        assert_eq!(sc.ident(), "cafe");
        assert_eq!(sc.next_char(), '\u{301}');
        assert!(sc.is_end());
    }

    #[test]
    fn does_not_cross_line_end() {
        let mut sc = Scanner::from_text("ab\ncd");
        assert_eq!(sc.peek_ident(), "ab");
        assert_eq!(sc.ident(), "ab");
        assert_eq!(sc.line_number(), 2);
        assert_eq!(sc.ident(), "cd");
    }
}
