use alloc::{format, string::String, vec::Vec};

use quickcheck::QuickCheck;

use crate::{Scanner, StandardEscaper};

pub(super) fn tests() -> u64 {
    if cfg!(miri) || cfg!(feature = "test-fast") {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

/// Property: any text escaped with the standard escaper and wrapped in
/// quotes reads back unchanged, and scanning continues after the literal.
#[test]
fn escaped_string_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let input = format!("\"{}\" end", StandardEscaper::quoted('"').escape(&text));
        let mut sc = Scanner::from_text(&input);
        sc.string() == text && sc.ident() == "end" && sc.is_end() && sc.err().is_none()
    }

    QuickCheck::new().tests(tests()).quickcheck(prop as fn(String) -> bool);
}

/// Property: character literals read back every scalar value.
#[test]
fn escaped_char_roundtrip_quickcheck() {
    fn prop(ch: char) -> bool {
        let input = format!("'{}'", StandardEscaper::quoted('\'').escape(ch.encode_utf8(&mut [0; 4])));
        let mut sc = Scanner::from_text(&input);
        sc.character() == ch && sc.err().is_none()
    }

    QuickCheck::new().tests(tests()).quickcheck(prop as fn(char) -> bool);
}

/// Property: integers and finite floats printed by `Display` parse back to
/// the same value.
#[test]
fn number_roundtrip_quickcheck() {
    #[allow(clippy::float_cmp)]
    fn prop(int: i64, float: f64) -> bool {
        if !float.is_finite() {
            return true;
        }
        let input = format!("{int} {float}");
        let mut sc = Scanner::from_text(&input);
        sc.int() == int && sc.float() == float && sc.is_end() && sc.err().is_none()
    }

    QuickCheck::new().tests(tests()).quickcheck(prop as fn(i64, f64) -> bool);
}

/// Property: input made only of whitespace and comments ends cleanly, with
/// no token and no error.
#[test]
fn blank_input_quickcheck() {
    const PIECES: [&str; 7] = [" ", "\t", "\n", "\r\n", "// line\n", "/* block */", "/*\n * multi\n */"];

    #[allow(clippy::needless_pass_by_value)]
    fn prop(picks: Vec<u8>) -> bool {
        let input: String = picks
            .iter()
            .map(|&p| PIECES[usize::from(p) % PIECES.len()])
            .collect();
        let sc = Scanner::from_text(&input);
        sc.is_end() && sc.peek() == '\0' && sc.err().is_none()
    }

    QuickCheck::new().tests(tests()).quickcheck(prop as fn(Vec<u8>) -> bool);
}
