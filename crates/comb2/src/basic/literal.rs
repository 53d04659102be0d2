//! Literal, set and range primitives, plus boundary productions.

use crate::combinator::{Combinator, Shape};
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::Status;

/// Something a [`Literal`] can match at the cursor: a single byte, a code
/// point, or a byte sequence.
pub trait Pattern {
    /// Consumes the pattern iff it is next in the input.
    fn consume(&self, seq: &mut Sequencer<'_>) -> bool;
}

impl Pattern for u8 {
    fn consume(&self, seq: &mut Sequencer<'_>) -> bool {
        seq.consume_if(*self)
    }
}

impl Pattern for char {
    fn consume(&self, seq: &mut Sequencer<'_>) -> bool {
        if self.is_ascii() {
            seq.consume_if(*self as u8)
        } else {
            let mut buf = [0u8; 4];
            seq.seek_if(self.encode_utf8(&mut buf).as_bytes())
        }
    }
}

impl Pattern for &str {
    fn consume(&self, seq: &mut Sequencer<'_>) -> bool {
        seq.seek_if(self.as_bytes())
    }
}

impl Pattern for String {
    fn consume(&self, seq: &mut Sequencer<'_>) -> bool {
        seq.seek_if(self.as_bytes())
    }
}

/// Matches a literal pattern.
#[derive(Debug, Clone)]
pub struct Literal<L>(L);

pub fn lit<L: Pattern>(literal: L) -> Literal<L> {
    Literal(literal)
}

impl<L> Shape for Literal<L> {}

impl<C: Context, R, L: Pattern> Combinator<C, R> for Literal<L> {
    fn parse(&self, seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) -> Status {
        if self.0.consume(seq) {
            Status::Match
        } else {
            Status::NotMatch
        }
    }
}

/// A set of alternatives a [`OneOf`] draws from.
pub trait CharSet {
    fn consume_one(&self, seq: &mut Sequencer<'_>) -> bool;
}

impl CharSet for &str {
    fn consume_one(&self, seq: &mut Sequencer<'_>) -> bool {
        self.chars().any(|c| c.consume(seq))
    }
}

impl CharSet for &[u8] {
    fn consume_one(&self, seq: &mut Sequencer<'_>) -> bool {
        self.iter().any(|b| seq.consume_if(*b))
    }
}

impl CharSet for String {
    fn consume_one(&self, seq: &mut Sequencer<'_>) -> bool {
        self.as_str().consume_one(seq)
    }
}

/// Consumes one element of a set.
#[derive(Debug, Clone)]
pub struct OneOf<L>(L);

pub fn one_of<L: CharSet>(set: L) -> OneOf<L> {
    OneOf(set)
}

impl<L> Shape for OneOf<L> {}

impl<C: Context, R, L: CharSet> Combinator<C, R> for OneOf<L> {
    fn parse(&self, seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) -> Status {
        if self.0.consume_one(seq) {
            Status::Match
        } else {
            Status::NotMatch
        }
    }
}

/// Consumes one byte in `[lo, hi]`.
#[derive(Debug, Clone, Copy)]
pub struct ByteRange {
    lo: u8,
    hi: u8,
}

pub fn range(lo: u8, hi: u8) -> ByteRange {
    ByteRange { lo, hi }
}

impl Shape for ByteRange {}

impl<C: Context, R> Combinator<C, R> for ByteRange {
    fn parse(&self, seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) -> Status {
        match seq.current() {
            Some(b) if self.lo <= b && b <= self.hi => {
                seq.consume();
                Status::Match
            }
            _ => Status::NotMatch,
        }
    }
}

/// Matches at end of sequence only.
#[derive(Debug, Clone, Copy)]
pub struct Eos;

/// Matches at the beginning of the sequence only.
#[derive(Debug, Clone, Copy)]
pub struct Bos;

/// Matches at the beginning of a line (start of input or right after CR/LF).
#[derive(Debug, Clone, Copy)]
pub struct Bol;

/// Always matches, consuming nothing.
#[derive(Debug, Clone, Copy)]
pub struct Null;

impl Shape for Eos {}
impl Shape for Bos {}
impl Shape for Bol {}
impl Shape for Null {}

impl<C: Context, R> Combinator<C, R> for Eos {
    fn parse(&self, seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) -> Status {
        if seq.eos() { Status::Match } else { Status::NotMatch }
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, _rec: &mut R) {
        if !seq.eos() {
            ctx.report_error(seq, format_args!("expected end of input"));
        }
    }
}

impl<C: Context, R> Combinator<C, R> for Bos {
    fn parse(&self, seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) -> Status {
        if seq.rptr == 0 {
            Status::Match
        } else {
            Status::NotMatch
        }
    }
}

impl<C: Context, R> Combinator<C, R> for Bol {
    fn parse(&self, seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) -> Status {
        if seq.rptr == 0
            || seq.current_at(-1) == Some(b'\r')
            || seq.current_at(-1) == Some(b'\n')
        {
            Status::Match
        } else {
            Status::NotMatch
        }
    }
}

impl<C: Context, R> Combinator<C, R> for Null {
    fn parse(&self, _seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) -> Status {
        Status::Match
    }
}
