//! Integer and float recognition.
//!
//! Numbers are recognized by capturing the longest plausible run of
//! characters and then parsing the whole run. There is no backtracking: if
//! the run does not parse, the token is rejected even when a prefix of it
//! would have been valid (`1.9` is not the integer `1`).
//!
//! Integer runs admit a leading `-`, decimal digits, letters (for radix
//! prefixes) and `.`. Other numeric characters such as `²` or `½` end the run. Float runs additionally admit `+`/`-` right after an `e`/`E`, so
//! `1e1-x` is the float `10` followed by `-x`.

use crate::{
    error::ErrorKind,
    ident::{is_decimal_digit, is_letter},
    scanner::Scanner,
    source::LineSource,
};

fn is_run_char(c: char) -> bool {
    c == '.' || is_decimal_digit(c) || is_letter(c)
}

/// Length of the integer run at the start of `text`.
fn int_run(text: &str) -> usize {
    text.char_indices()
        .find(|&(i, c)| !((i == 0 && c == '-') || is_run_char(c)))
        .map_or(text.len(), |(i, _)| i)
}

/// Length of the float run at the start of `text`.
fn float_run(text: &str) -> usize {
    let mut after_exp = false;
    for (i, c) in text.char_indices() {
        let sign_ok = (i == 0 && c == '-') || (after_exp && (c == '-' || c == '+'));
        if !(sign_ok || is_run_char(c)) {
            return i;
        }
        after_exp = c == 'e' || c == 'E';
    }
    text.len()
}

/// Parses a complete integer literal: decimal, `0x` hexadecimal, `0o` or
/// leading-zero octal, or `0b` binary, with an optional leading `-`.
pub(crate) fn parse_int(lexeme: &str) -> Option<i64> {
    let (negative, body) = match lexeme.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, lexeme),
    };

    let (radix, digits) = if let Some(digits) = strip_radix_prefix(body, "0x") {
        (16, digits)
    } else if let Some(digits) = strip_radix_prefix(body, "0o") {
        (8, digits)
    } else if let Some(digits) = strip_radix_prefix(body, "0b") {
        (2, digits)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn strip_radix_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

/// Checks `lexeme` against `-? digits? (. digits?)? ([eE] [+-]? digits)?`
/// with at least one mantissa digit, then converts it.
pub(crate) fn parse_float(lexeme: &str) -> Option<f64> {
    let bytes = lexeme.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut i = usize::from(bytes.first() == Some(&b'-'));
    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_end = digits_from(i);
        if exp_end == i {
            return None;
        }
        i = exp_end;
    }
    if i != bytes.len() {
        return None;
    }
    lexeme.parse().ok()
}

/// The integer at the start of `text` and the length of its run.
fn peek_int(text: &str) -> Option<(i64, usize)> {
    let len = int_run(text);
    parse_int(&text[..len]).map(|value| (value, len))
}

/// The float at the start of `text` and the length of its run. Integers,
/// including hexadecimal and octal ones, are floats too.
#[allow(clippy::cast_precision_loss)]
fn peek_float(text: &str) -> Option<(f64, usize)> {
    if let Some((value, len)) = peek_int(text) {
        return Some((value as f64, len));
    }
    let len = float_run(text);
    parse_float(&text[..len]).map(|value| (value, len))
}

impl<S: LineSource> Scanner<S> {
    /// Returns `true` if the next token is an integer.
    #[must_use]
    pub fn is_int(&self) -> bool {
        self.peek_int().is_some()
    }

    /// Returns the next token as an integer without advancing, or `None` if
    /// it is not one.
    #[must_use]
    pub fn peek_int(&self) -> Option<i64> {
        peek_int(self.rest()).map(|(value, _)| value)
    }

    /// Consumes the next token as an integer, or fails with
    /// `integer expected` without advancing.
    pub fn int(&mut self) -> i64 {
        match peek_int(self.rest()) {
            Some((value, len)) => {
                self.consume(len);
                value
            }
            None => {
                self.fail_with(ErrorKind::IntegerExpected);
                0
            }
        }
    }

    /// Returns `true` if the next token is a float (or an integer).
    #[must_use]
    pub fn is_float(&self) -> bool {
        self.peek_float().is_some()
    }

    /// Returns the next token as a float without advancing, or `None` if it
    /// is not one.
    #[must_use]
    pub fn peek_float(&self) -> Option<f64> {
        peek_float(self.rest()).map(|(value, _)| value)
    }

    /// Consumes the next token as a float, or fails with `float expected`
    /// without advancing.
    pub fn float(&mut self) -> f64 {
        match peek_float(self.rest()) {
            Some((value, len)) => {
                self.consume(len);
                value
            }
            None => {
                self.fail_with(ErrorKind::FloatExpected);
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0", 0)]
    #[case("0 ", 0)]
    #[case(" 0", 0)]
    #[case("1 2", 1)]
    #[case("1", 1)]
    #[case("-1", -1)]
    #[case("12345", 12345)]
    #[case("-100", -100)]
    #[case("0x10", 0x10)]
    #[case("0XFF", 0xFF)]
    #[case("0xab", 0xab)]
    #[case("012", 0o12)]
    #[case("0o17", 0o17)]
    #[case("0b101", 0b101)]
    #[case("-0x10", -0x10)]
    #[case("9223372036854775807", i64::MAX)]
    #[case("-9223372036854775808", i64::MIN)]
    #[case("1²", 1)]
    #[case("7½", 7)]
    fn int_accepts(#[case] input: &str, #[case] expected: i64) {
        let mut sc = Scanner::from_text(input);
        assert!(sc.is_int(), "input {input:?}");
        assert_eq!(sc.peek_int(), Some(expected));
        assert_eq!(sc.int(), expected);
        assert_eq!(sc.err(), None, "input {input:?}");
    }

    #[rstest]
    #[case("")]
    #[case("a")]
    #[case(" a")]
    #[case("0a")]
    #[case("-")]
    #[case("0x")]
    #[case("0x(")]
    #[case("0xG")]
    #[case("0xg")]
    #[case("1.9")]
    #[case(".5")]
    #[case("09")]
    #[case("9223372036854775808")]
    fn int_rejects(#[case] input: &str) {
        let mut sc = Scanner::from_text(input);
        assert!(!sc.is_int(), "input {input:?}");
        assert_eq!(sc.int(), 0);
        let err = sc.err().expect("integer error");
        assert_eq!(err.kind(), &ErrorKind::IntegerExpected);
    }

    #[rstest]
    #[case("0", 0.0)]
    #[case("0 ", 0.0)]
    #[case("0.", 0.0)]
    #[case(".0", 0.0)]
    #[case(" 0", 0.0)]
    #[case("1", 1.0)]
    #[case("-1", -1.0)]
    #[case("12345", 12345.0)]
    #[case("-100", -100.0)]
    #[case("01", 1.0)]
    #[case("0.1", 0.1)]
    #[case(".1", 0.1)]
    #[case("2.", 2.0)]
    #[case("-.1", -0.1)]
    #[case("09.0", 9.0)]
    #[case("1e9", 1e9)]
    #[case("-1.5e9", -1.5e9)]
    #[case("-1e-1", -1e-1)]
    #[case("-.1e-1", -0.1e-1)]
    #[case(".1e1", 0.1e1)]
    #[case("1.e1", 1.0e1)]
    #[case("0xF", 15.0)]
    #[case("012", 10.0)]
    #[case("-07", -7.0)]
    #[case("-0xf0", -240.0)]
    #[case("1,", 1.0)]
    #[case("1 a", 1.0)]
    #[case("1+x", 1.0)]
    #[case("1-x", 1.0)]
    #[case("-1+x", -1.0)]
    #[case("-1-x", -1.0)]
    #[case("1e1-x", 1e1)]
    #[case("1e+1-x", 1e+1)]
    #[case("2.5½", 2.5)]
    #[case("3Ⅷ", 3.0)]
    #[case("1e-1-x", 1e-1)]
    fn float_accepts(#[case] input: &str, #[case] expected: f64) {
        let mut sc = Scanner::from_text(input);
        assert!(sc.is_float(), "input {input:?}");
        assert_eq!(sc.peek_float(), Some(expected));
        assert!((sc.float() - expected).abs() < f64::EPSILON, "input {input:?}");
        assert_eq!(sc.err(), None, "input {input:?}");
    }

    #[rstest]
    #[case("")]
    #[case("a")]
    #[case(" a")]
    #[case("0a")]
    #[case("1e")]
    #[case("1e-")]
    #[case("1ea")]
    #[case("1e.1")]
    #[case("1e1a")]
    #[case(".")]
    #[case("-.")]
    #[case("-")]
    #[case("0x")]
    #[case("0xG")]
    #[case("1e+x")]
    #[case("nan")]
    #[case("inf")]
    fn float_rejects(#[case] input: &str) {
        let mut sc = Scanner::from_text(input);
        assert!(!sc.is_float(), "input {input:?}");
        assert_eq!(sc.float(), 0.0);
        let err = sc.err().expect("float error");
        assert_eq!(err.kind(), &ErrorKind::FloatExpected);
    }

    #[test]
    fn float_leaves_trailing_sign_for_next_token() {
        let mut sc = Scanner::from_text("1e1-x");
        assert_eq!(sc.float(), 10.0);
        assert!(sc.is("-x"));
        assert_eq!(sc.next_char(), '-');
        assert_eq!(sc.ident(), "x");
        assert!(sc.is_end());
    }

    #[test]
    fn other_numeric_characters_end_the_run() {
        let mut sc = Scanner::from_text("1² 2.5½");
        assert_eq!(sc.int(), 1);
        assert_eq!(sc.next_char(), '²');
        assert_eq!(sc.float(), 2.5);
        assert_eq!(sc.next_char(), '½');
        assert!(sc.is_end());
        assert_eq!(sc.err(), None);
    }

    #[test]
    fn non_ascii_decimal_digits_do_not_parse() {
        let mut sc = Scanner::from_text("1\u{0663}");
        assert!(!sc.is_int());
        assert!(!sc.is_float());
    }

    #[test]
    fn failed_int_does_not_advance() {
        let mut sc = Scanner::from_text("x 1");
        assert_eq!(sc.peek_int(), None);
        assert_eq!(sc.column(), 0);
        assert_eq!(sc.int(), 0);
        let err = sc.err().unwrap();
        assert_eq!(err.column(), 0);
        assert_eq!(err.line(), "x 1");
    }

    #[quickcheck_macros::quickcheck]
    fn int_display_roundtrip(value: i64) -> bool {
        let text = value.to_string();
        let mut sc = Scanner::from_text(&text);
        sc.int() == value && sc.is_end()
    }

    #[test]
    fn runs() {
        assert_eq!(int_run("-12-3"), 3);
        assert_eq!(int_run("1e+5"), 2);
        assert_eq!(float_run("1e+5-2"), 4);
        assert_eq!(float_run("-1.5E-3,"), 7);
        assert_eq!(float_run("abc"), 3);
    }
}
