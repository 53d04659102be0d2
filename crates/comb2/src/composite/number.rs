//! Number scanners.
//!
//! The prefixed integers and the exponent/fraction digit runs are cut: once
//! a `0x`/`0o`/`0b` prefix or an exponent marker has been consumed, missing
//! digits are a fatal error rather than a backtrack.

use crate::basic::{and_, lit, must_match, not_, optional, or_, repeat};
use crate::combinator::{Combinator, Shape};
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::Status;

/// Consumes one digit of the given radix.
#[derive(Debug, Clone, Copy)]
pub struct RadixDigit {
    radix: u32,
}

/// Panics if `radix` is outside `2..=36`.
pub fn radix_number(radix: u32) -> RadixDigit {
    assert!((2..=36).contains(&radix), "radix out of range");
    RadixDigit { radix }
}

impl Shape for RadixDigit {}

impl<C: Context, R> Combinator<C, R> for RadixDigit {
    fn parse(&self, seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) -> Status {
        match seq.current() {
            Some(b) if (b as char).to_digit(self.radix).is_some() => {
                seq.consume();
                Status::Match
            }
            _ => Status::NotMatch,
        }
    }
}

pub fn binary_number() -> RadixDigit {
    radix_number(2)
}

pub fn octal_number() -> RadixDigit {
    radix_number(8)
}

pub fn decimal_number() -> RadixDigit {
    radix_number(10)
}

pub fn hexadecimal_number() -> RadixDigit {
    radix_number(16)
}

fn hex_prefix<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(lit(b'0'), or_(lit(b'x'), lit(b'X')))
}

fn oct_prefix<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(lit(b'0'), or_(lit(b'o'), lit(b'O')))
}

fn bin_prefix<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(lit(b'0'), or_(lit(b'b'), lit(b'B')))
}

pub fn hex_integer<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(hex_prefix(), must_match(repeat(hexadecimal_number())))
}

pub fn oct_integer<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(oct_prefix(), must_match(repeat(octal_number())))
}

pub fn bin_integer<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(bin_prefix(), must_match(repeat(binary_number())))
}

pub fn dec_integer<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    repeat(decimal_number())
}

/// `.digits`, `digits.`, or `digits.digits`, with an optional exponent
/// whose digit run is cut.
pub fn dec_float<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    let mantissa = or_(
        and_(lit(b'.'), repeat(decimal_number())),
        and_(
            repeat(decimal_number()),
            optional(and_(lit(b'.'), optional(repeat(decimal_number())))),
        ),
    );
    let exponent = and_(
        and_(or_(lit(b'e'), lit(b'E')), optional(or_(lit(b'+'), lit(b'-')))),
        must_match(repeat(decimal_number())),
    );
    and_(mantissa, optional(exponent))
}

/// Lookahead guard: fails where `dec_float` would start.
pub fn not_dec_float<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    not_(or_(
        lit(b'.'),
        and_(
            repeat(decimal_number()),
            or_(or_(lit(b'.'), lit(b'e')), lit(b'E')),
        ),
    ))
}

pub fn hex_float<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    let mantissa = or_(
        and_(lit(b'.'), repeat(hexadecimal_number())),
        and_(
            repeat(hexadecimal_number()),
            optional(and_(lit(b'.'), optional(repeat(hexadecimal_number())))),
        ),
    );
    let exponent = and_(
        and_(or_(lit(b'p'), lit(b'P')), optional(or_(lit(b'+'), lit(b'-')))),
        must_match(repeat(decimal_number())),
    );
    and_(hex_prefix(), must_match(and_(mantissa, optional(exponent))))
}

pub fn not_hex_float<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    not_(and_(
        hex_prefix(),
        or_(
            lit(b'.'),
            and_(
                repeat(hexadecimal_number()),
                or_(or_(lit(b'.'), lit(b'p')), lit(b'P')),
            ),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NullContext;

    fn run(c: &impl Combinator<NullContext, ()>, input: &str) -> Status {
        let mut seq = Sequencer::new(input);
        c.parse(&mut seq, &mut NullContext::new(), &mut ())
    }

    #[test]
    fn floats() {
        assert_eq!(run(&hex_float(), "0x.01p20"), Status::Match);
        assert_eq!(run(&dec_float(), "0.012"), Status::Match);
        assert_eq!(run(&dec_float(), ".02E+2"), Status::Match);
        assert_eq!(run(&not_dec_float(), "12030"), Status::Match);
        assert_eq!(run(&not_dec_float(), ".12030"), Status::NotMatch);
        assert_eq!(run(&not_hex_float(), "0x0200"), Status::Match);
        // exponent marker consumed, digits missing: past the cut
        assert_eq!(run(&hex_float(), "0x0pf"), Status::Fatal);
    }

    #[test]
    fn integers() {
        assert_eq!(run(&hex_integer(), "0xff"), Status::Match);
        assert_eq!(run(&bin_integer(), "0b1010"), Status::Match);
        assert_eq!(run(&oct_integer(), "0o777"), Status::Match);
        assert_eq!(run(&dec_integer(), "123"), Status::Match);
        // prefix without digits is past the cut
        assert_eq!(run(&hex_integer(), "0xzz"), Status::Fatal);
        assert_eq!(run(&hex_integer(), "9"), Status::NotMatch);
    }
}
