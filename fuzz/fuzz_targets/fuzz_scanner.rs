#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use linescan::{ScanError, Scanner, ScannerOptions, StandardEscaper, StrSource};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};

const OPS: usize = 32;
const HEADER: usize = 1 + OPS; // 1 flag byte + one byte per operation

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Fragments the mutator splices into the text, biased towards the places
/// where comment skipping and quote decoding meet line breaks.
static PIECE_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r\n",
    "\u{00a0}".as_bytes(),
    "\u{2003}".as_bytes(),
    "\u{3000}".as_bytes(),
    b"//",
    b"/*",
    b"*/",
    b"#",
    b"(*",
    b"*)",
    b"\"",
    b"'",
    b"\\",
    b"\\x7f",
    b"\\u263a",
    b"\\U0001F600",
    b"\\777",
    b"[[",
    b"]]",
    b"ident",
    b"0x1F",
    b"-12",
    b"1.5e-3",
    b"=",
    b";",
];

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    Peek,
    NextChar,
    Is,
    Eat,
    Demand,
    Ident,
    PeekIdent,
    Int,
    Float,
    Str,
    Character,
    Quote,
    QuoteMultiline,
    QuoteMultilineEscaped,
    Fail,
}

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(4) {
        if max_size < HEADER {
            return fuzzer_mutate(data, size, max_size);
        }
        if size < HEADER {
            with_rng(|rng| rng.fill_bytes(&mut data[..HEADER]));
        }

        let mut end = size.max(HEADER);
        let pieces = with_rng(|rng| rng.random_range(1..=8));
        for _ in 0..pieces {
            let piece = with_rng(|rng| PIECE_TABLE[rng.random_range(0..PIECE_TABLE.len())]);
            if end + piece.len() > max_size {
                break;
            }
            // Insert at a random position inside the text part.
            let at = with_rng(|rng| rng.random_range(HEADER..=end));
            data.copy_within(at..end, at + piece.len());
            data[at..at + piece.len()].copy_from_slice(piece);
            end += piece.len();
        }
        end
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

fn options(flags: u8) -> ScannerOptions {
    match flags & 3 {
        0 => ScannerOptions::default(),
        1 => ScannerOptions::no_comments(),
        2 => ScannerOptions {
            line_comment: Some("#"),
            block_comment: Some(("(*", "*)")),
        },
        _ => ScannerOptions {
            line_comment: Some("//"),
            block_comment: None,
        },
    }
}

fn apply(sc: &mut Scanner<StrSource<'_>>, op: Op) {
    let escaper = StandardEscaper::new();
    match op {
        Op::Peek => {
            let ch = sc.peek();
            assert!(!ch.is_whitespace(), "peek returned whitespace {ch:?}");
        }
        Op::NextChar => drop(sc.next_char()),
        Op::Is => drop(sc.is("=")),
        Op::Eat => drop(sc.eat(";")),
        Op::Demand => sc.demand("="),
        Op::Ident => drop(sc.ident()),
        Op::PeekIdent => drop(sc.peek_ident().len()),
        Op::Int => drop(sc.int()),
        Op::Float => drop(sc.float()),
        Op::Str => drop(sc.string()),
        Op::Character => drop(sc.character()),
        Op::Quote => drop(sc.quote("<", ">", None)),
        Op::QuoteMultiline => drop(sc.quote_multiline("[[", "]]", None)),
        Op::QuoteMultilineEscaped => drop(sc.quote_multiline("[[", "]]", Some(&escaper))),
        Op::Fail => sc.fail("fuzz"),
    }
}

fn check_error(err: &ScanError) {
    assert!(err.line().is_char_boundary(err.column()), "column {} outside {:?}", err.column(), err.line());
    let excerpt = err.position_indicator();
    assert!(excerpt.ends_with('^'));
}

fn scanner(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let Ok(ops) = Unstructured::new(&data[1..HEADER]).arbitrary_take_rest::<Vec<Op>>() else {
        return;
    };
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    let mut sc = Scanner::with_options(StrSource::new(&text), options(flags));
    let mut first: Option<ScanError> = None;
    for op in ops {
        apply(&mut sc, op);

        // Once latched, the first error never changes and nothing is current.
        match &first {
            Some(first) => assert_eq!(sc.err(), Some(first)),
            None => first = sc.err().cloned(),
        }
        if sc.is_end() {
            assert_eq!(sc.peek(), '\0');
            assert_eq!(sc.column(), 0);
        }
    }

    if let Some(err) = sc.err() {
        check_error(err);
    }
}

fuzz_target!(|data: &[u8]| scanner(data));
