//! Speculative recognition.

use crate::combinator::{Combinator, Shape};
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::{CallbackKind, Status};

/// Positive lookahead: runs `A`, restores the cursor, forwards `A`'s
/// status. No provisional tree nodes are committed while peeking.
#[derive(Debug, Clone)]
pub struct Peek<A> {
    a: A,
}

pub fn peek<A>(a: A) -> Peek<A> {
    Peek { a }
}

impl<A> Shape for Peek<A> {}

impl<C: Context, R, A: Combinator<C, R>> Combinator<C, R> for Peek<A> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        ctx.logic_entry(CallbackKind::PeekBegin);
        let ptr = seq.rptr;
        let res = self.a.parse(seq, ctx, rec);
        if res == Status::Fatal {
            ctx.report_error(seq, format_args!("fatal status while peeking"));
            ctx.logic_result(CallbackKind::PeekEnd, Status::Fatal);
            return Status::Fatal;
        }
        seq.rptr = ptr;
        ctx.logic_result(CallbackKind::PeekEnd, res);
        res
    }
}

/// Negative lookahead: like [`Peek`] with `Match` and `NotMatch` swapped;
/// `Fatal` still propagates.
#[derive(Debug, Clone)]
pub struct Not<A> {
    a: A,
}

pub fn not_<A>(a: A) -> Not<A> {
    Not { a }
}

impl<A> Shape for Not<A> {}

impl<C: Context, R, A: Combinator<C, R>> Combinator<C, R> for Not<A> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        ctx.logic_entry(CallbackKind::PeekBegin);
        let ptr = seq.rptr;
        let res = self.a.parse(seq, ctx, rec);
        if res == Status::Fatal {
            ctx.report_error(seq, format_args!("fatal status while peeking"));
            ctx.logic_result(CallbackKind::PeekEnd, Status::Fatal);
            return Status::Fatal;
        }
        seq.rptr = ptr;
        let inverted = match res {
            Status::Match => Status::NotMatch,
            _ => Status::Match,
        };
        ctx.logic_result(CallbackKind::PeekEnd, inverted);
        inverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::lit;
    use crate::context::NullContext;

    fn run(c: &impl Combinator<NullContext, ()>, input: &str) -> (Status, usize) {
        let mut seq = Sequencer::new(input);
        let status = c.parse(&mut seq, &mut NullContext::new(), &mut ());
        (status, seq.rptr)
    }

    #[test]
    fn peek_is_neutral() {
        assert_eq!(run(&peek(lit("ab")), "abc"), (Status::Match, 0));
        assert_eq!(run(&peek(lit("ab")), "xbc"), (Status::NotMatch, 0));
    }

    #[test]
    fn not_inverts() {
        assert_eq!(run(&not_(lit("ab")), "abc"), (Status::NotMatch, 0));
        assert_eq!(run(&not_(lit("ab")), "xbc"), (Status::Match, 0));
    }
}
