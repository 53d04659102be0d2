//! Character classes and line primitives.

use crate::basic::{
    ByteRange, Literal, UnicodeLiteral, and_, lit, optional, or_, range, repeat, ulit,
};
use crate::combinator::{Combinator, Shape};
use crate::context::Context;

pub fn small_alphabet() -> ByteRange {
    range(b'a', b'z')
}

pub fn large_alphabet() -> ByteRange {
    range(b'A', b'Z')
}

pub fn alphabet<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    or_(small_alphabet(), large_alphabet())
}

pub fn digit() -> ByteRange {
    range(b'0', b'9')
}

pub fn bit() -> ByteRange {
    range(b'0', b'1')
}

pub fn oct_digit() -> ByteRange {
    range(b'0', b'7')
}

pub fn hex_digit<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    or_(or_(digit(), range(b'a', b'f')), range(b'A', b'F'))
}

pub fn c_ident_first<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    or_(alphabet(), lit(b'_'))
}

pub fn c_ident_next<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    or_(c_ident_first(), digit())
}

/// `(alpha | '_') (alnum | '_')*`
pub fn c_ident<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(c_ident_first(), optional(repeat(c_ident_next())))
}

/// Line terminator: optional CR then LF.
pub fn eol<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(optional(lit(b'\r')), lit(b'\n'))
}

pub fn space() -> Literal<u8> {
    lit(b' ')
}

pub fn tab() -> Literal<u8> {
    lit(b'\t')
}

pub fn byte_order_mark() -> UnicodeLiteral<char> {
    ulit('\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NullContext;
    use crate::{Sequencer, Status};

    fn run(c: &impl Combinator<NullContext, ()>, input: &str) -> (Status, usize) {
        let mut seq = Sequencer::new(input);
        let status = c.parse(&mut seq, &mut NullContext::new(), &mut ());
        (status, seq.rptr)
    }

    #[test]
    fn idents() {
        assert_eq!(run(&c_ident(), "ident"), (Status::Match, 5));
        assert_eq!(run(&c_ident(), "_Vtable2"), (Status::Match, 8));
        assert_eq!(run(&c_ident(), "2x"), (Status::NotMatch, 0));
    }

    #[test]
    fn line_ends() {
        assert_eq!(run(&eol(), "\n"), (Status::Match, 1));
        assert_eq!(run(&eol(), "\r\n"), (Status::Match, 2));
        assert_eq!(run(&eol(), "\r"), (Status::NotMatch, 0));
    }

    #[test]
    fn bom() {
        let (status, advanced) = run(&byte_order_mark(), "\u{FEFF}x");
        assert_eq!((status, advanced), (Status::Match, 3));
    }
}
