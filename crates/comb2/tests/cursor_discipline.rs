//! Cursor discipline across the combinator algebra: `NotMatch` always
//! leaves the cursor at its entry value, `Match` never moves it backwards,
//! and repetition only accepts forward progress.

use comb2::basic::{
    Bol, Bos, Eos, Null, Uany, and_, capture, group, limited_repeat, lit, must_match, not_,
    one_of, optional, or_, peek, range, repeat, ulit,
};
use comb2::composite::{c_comment, c_ident, c_str, dec_float, dec_integer, hex_integer};
use comb2::{Combinator, NullContext, Sequencer, Status};

fn probe(c: &impl Combinator<NullContext, ()>, input: &str) {
    for start in 0..=input.len() {
        let mut seq = Sequencer::new(input);
        seq.rptr = start;
        let entry = seq.rptr;
        match c.parse(&mut seq, &mut NullContext::new(), &mut ()) {
            Status::Match => assert!(
                seq.rptr >= entry,
                "cursor moved backwards from {entry} to {} on {input:?}",
                seq.rptr
            ),
            Status::NotMatch => assert_eq!(
                seq.rptr, entry,
                "cursor not restored after NotMatch at {entry} on {input:?}"
            ),
            Status::Fatal => {}
        }
    }
}

#[test]
fn primitives_restore_on_not_match() {
    for input in ["", "a", "ab", "xyz", "0", " a"] {
        probe(&lit(b'a'), input);
        probe(&lit("ab"), input);
        probe(&one_of("xy"), input);
        probe(&range(b'0', b'9'), input);
        probe(&ulit('あ'), input);
        probe(&Uany, input);
        probe(&Eos, input);
        probe(&Bos, input);
        probe(&Bol, input);
        probe(&Null, input);
    }
}

#[test]
fn logic_restores_on_not_match() {
    for input in ["", "a", "ab", "abc", "ax", "ba", "aab"] {
        probe(&and_(lit(b'a'), lit(b'b')), input);
        probe(&or_(lit("ab"), lit("aa")), input);
        probe(&optional(lit(b'a')), input);
        probe(&repeat(lit(b'a')), input);
        probe(&limited_repeat(2, 3, lit(b'a')), input);
        probe(&peek(lit("ab")), input);
        probe(&not_(lit("ab")), input);
        probe(&and_(and_(lit(b'a'), lit(b'a')), lit(b'b')), input);
    }
}

#[test]
fn captures_restore_on_not_match() {
    for input in ["", "ab", "a1", "12"] {
        probe(&capture("t", and_(lit(b'a'), lit(b'b'))), input);
        probe(&group("g", and_(lit(b'a'), lit(b'b'))), input);
    }
}

#[test]
fn composites_restore_on_not_match() {
    for input in ["", "x", "ident", "0x", "0", "1.5", "\"s\"", "/*c*/", "/x"] {
        probe(&c_ident(), input);
        probe(&dec_integer(), input);
        probe(&dec_float(), input);
        probe(&c_str(), input);
        probe(&c_comment(), input);
    }
    // hex_integer cuts after the prefix, so only probe inputs that do not
    // reach the cut with missing digits
    for input in ["", "x", "0xff", "9"] {
        probe(&hex_integer(), input);
    }
}

#[test]
fn repeat_requires_strict_progress() {
    // every successful iteration must advance; the guard converts a stalled
    // match into a fatal abort instead of spinning
    let stalled = repeat(peek(Null));
    let mut seq = Sequencer::new("abc");
    assert_eq!(
        stalled.parse(&mut seq, &mut NullContext::<&str>::new(), &mut ()),
        Status::Fatal
    );
}

#[test]
fn must_match_never_says_not_match() {
    for input in ["", "a", "b"] {
        let mut seq = Sequencer::new(input);
        let status = must_match(lit(b'a')).parse(&mut seq, &mut NullContext::<&str>::new(), &mut ());
        assert_ne!(status, Status::NotMatch, "cut leaked NotMatch on {input:?}");
    }
}
