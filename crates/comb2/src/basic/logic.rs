//! Logic combinators: sequencing, ordered choice, repetition and cut.
//!
//! Contracts shared by everything here: `Fatal` from a child short-circuits
//! the whole subtree, entry/result callbacks close on every exit path, and
//! the cursor is back at its entry value whenever `NotMatch` is returned.

use crate::combinator::{Combinator, Shape};
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::{CallbackKind, Status};

/// `A` then `B`; returns `B`'s result.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    a: A,
    b: B,
}

pub fn and_<A, B>(a: A, b: B) -> And<A, B> {
    And { a, b }
}

impl<A, B> Shape for And<A, B> {}

impl<C: Context, R, A, B> Combinator<C, R> for And<A, B>
where
    A: Combinator<C, R>,
    B: Combinator<C, R>,
{
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        let ptr = seq.rptr;
        let res = self.a.parse(seq, ctx, rec);
        if res != Status::Match {
            return res;
        }
        let res = self.b.parse(seq, ctx, rec);
        if res == Status::NotMatch {
            seq.rptr = ptr;
        }
        res
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        self.a.must_match_error(seq, ctx, rec);
        self.b.must_match_error(seq, ctx, rec);
    }
}

/// Ordered choice: `A`, or `B` from the same position if `A` did not match.
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    a: A,
    b: B,
}

pub fn or_<A, B>(a: A, b: B) -> Or<A, B> {
    Or { a, b }
}

impl<A, B> Shape for Or<A, B> {}

impl<C: Context, R, A, B> Combinator<C, R> for Or<A, B>
where
    A: Combinator<C, R>,
    B: Combinator<C, R>,
{
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        ctx.logic_entry(CallbackKind::BranchEntry);
        let ptr = seq.rptr;
        let res = self.a.parse(seq, ctx, rec);
        match res {
            Status::Fatal => {
                ctx.logic_result(CallbackKind::BranchResult, Status::Fatal);
                return Status::Fatal;
            }
            Status::Match => {
                ctx.logic_result(CallbackKind::BranchResult, Status::Match);
                return Status::Match;
            }
            Status::NotMatch => {}
        }
        ctx.logic_result(CallbackKind::BranchOther, Status::NotMatch);
        ctx.logic_entry(CallbackKind::BranchOther);
        seq.rptr = ptr;
        let res = self.b.parse(seq, ctx, rec);
        match res {
            Status::Fatal => {
                ctx.logic_result(CallbackKind::BranchResult, Status::Fatal);
                Status::Fatal
            }
            Status::Match => {
                ctx.logic_result(CallbackKind::BranchResult, Status::Match);
                Status::Match
            }
            Status::NotMatch => {
                ctx.logic_result(CallbackKind::BranchResult, Status::NotMatch);
                seq.rptr = ptr;
                Status::NotMatch
            }
        }
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        self.a.must_match_error(seq, ctx, rec);
        self.b.must_match_error(seq, ctx, rec);
    }
}

/// Zero-or-one; always returns `Match`.
#[derive(Debug, Clone)]
pub struct Optional<A> {
    a: A,
}

pub fn optional<A>(a: A) -> Optional<A> {
    Optional { a }
}

impl<A> Shape for Optional<A> {
    const IS_OPTIONAL: bool = true;
}

impl<C: Context, R, A: Combinator<C, R>> Combinator<C, R> for Optional<A> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        ctx.logic_entry(CallbackKind::OptionalEntry);
        let ptr = seq.rptr;
        let res = self.a.parse(seq, ctx, rec);
        if res == Status::Fatal {
            ctx.logic_result(CallbackKind::OptionalResult, Status::Fatal);
            return Status::Fatal;
        }
        ctx.logic_result(CallbackKind::OptionalResult, res);
        if res == Status::NotMatch {
            seq.rptr = ptr;
        }
        Status::Match
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        self.a.must_match_error(seq, ctx, rec);
    }
}

/// One-or-more repetitions of `A`.
///
/// Guards against recognizers that succeed without consuming: a `Match`
/// that does not advance the cursor is reported as an infinite loop and
/// turns the parse `Fatal`.
#[derive(Debug, Clone)]
pub struct Repeat<A> {
    a: A,
}

pub fn repeat<A: Shape>(a: A) -> Repeat<A> {
    const {
        assert!(
            !A::IS_OPTIONAL,
            "repeat(optional(..)) never terminates; write optional(repeat(..)) instead"
        )
    };
    Repeat { a }
}

impl<A> Shape for Repeat<A> {}

impl<C: Context, R, A: Combinator<C, R>> Combinator<C, R> for Repeat<A> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        ctx.logic_entry(CallbackKind::RepeatEntry);
        let mut first = true;
        loop {
            let ptr = seq.rptr;
            let res = self.a.parse(seq, ctx, rec);
            if res == Status::Fatal {
                ctx.logic_result(CallbackKind::RepeatResult, Status::Fatal);
                return Status::Fatal;
            }
            if res == Status::NotMatch {
                seq.rptr = ptr;
                break;
            }
            if seq.rptr <= ptr {
                ctx.report_error(seq, format_args!("detect infinity loop at {}", seq.rptr));
                ctx.logic_result(CallbackKind::RepeatResult, Status::Fatal);
                return Status::Fatal;
            }
            ctx.logic_result(CallbackKind::RepeatStep, Status::Match);
            ctx.logic_entry(CallbackKind::RepeatStep);
            first = false;
        }
        let status = if first { Status::NotMatch } else { Status::Match };
        ctx.logic_result(CallbackKind::RepeatResult, status);
        status
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        self.a.must_match_error(seq, ctx, rec);
    }
}

/// `min..=max` repetitions of `A`; `Match` iff at least `min` succeeded.
#[derive(Debug, Clone)]
pub struct LimitedRepeat<A> {
    min: usize,
    max: usize,
    a: A,
}

pub fn limited_repeat<A: Shape>(min: usize, max: usize, a: A) -> LimitedRepeat<A> {
    const {
        assert!(
            !A::IS_OPTIONAL,
            "limited_repeat over optional(..) never terminates; write optional(repeat(..)) instead"
        )
    };
    LimitedRepeat { min, max, a }
}

impl<A> Shape for LimitedRepeat<A> {}

impl<C: Context, R, A: Combinator<C, R>> Combinator<C, R> for LimitedRepeat<A> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        ctx.logic_entry(CallbackKind::RepeatEntry);
        let entry = seq.rptr;
        let mut count = 0usize;
        while count < self.max {
            let ptr = seq.rptr;
            let res = self.a.parse(seq, ctx, rec);
            if res == Status::Fatal {
                ctx.logic_result(CallbackKind::RepeatResult, Status::Fatal);
                return Status::Fatal;
            }
            if res == Status::NotMatch {
                seq.rptr = ptr;
                break;
            }
            if seq.rptr <= ptr {
                ctx.report_error(seq, format_args!("detect infinity loop at {}", seq.rptr));
                ctx.logic_result(CallbackKind::RepeatResult, Status::Fatal);
                return Status::Fatal;
            }
            ctx.logic_result(CallbackKind::RepeatStep, Status::Match);
            ctx.logic_entry(CallbackKind::RepeatStep);
            count += 1;
        }
        let status = if count < self.min {
            seq.rptr = entry;
            Status::NotMatch
        } else {
            Status::Match
        };
        ctx.logic_result(CallbackKind::RepeatResult, status);
        status
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        self.a.must_match_error(seq, ctx, rec);
    }
}

/// Cut: once reached, `A` has to match. `NotMatch` from `A` becomes
/// `Fatal` after asking `A` for its cut diagnostic.
#[derive(Debug, Clone)]
pub struct MustMatch<A> {
    a: A,
}

pub fn must_match<A>(a: A) -> MustMatch<A> {
    MustMatch { a }
}

impl<A> Shape for MustMatch<A> {}

impl<C: Context, R, A: Combinator<C, R>> Combinator<C, R> for MustMatch<A> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        let res = self.a.parse(seq, ctx, rec);
        match res {
            Status::Fatal => Status::Fatal,
            Status::Match => Status::Match,
            Status::NotMatch => {
                self.a.must_match_error(seq, ctx, rec);
                Status::Fatal
            }
        }
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        self.a.must_match_error(seq, ctx, rec);
    }
}

/// Zero-or-more: `optional(repeat(a))`.
pub fn optional_repeat<A: Shape>(a: A) -> Optional<Repeat<A>> {
    optional(repeat(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{Eos, lit, proxy, range};
    use crate::context::{LexContext, NullContext};

    fn run(c: &impl Combinator<NullContext, ()>, input: &str) -> (Status, usize) {
        let mut seq = Sequencer::new(input);
        let status = c.parse(&mut seq, &mut NullContext::new(), &mut ());
        (status, seq.rptr)
    }

    #[test]
    fn and_sequences() {
        let ab = and_(lit(b'a'), lit(b'b'));
        assert_eq!(run(&ab, "ab"), (Status::Match, 2));
        assert_eq!(run(&ab, "ac"), (Status::NotMatch, 0));
    }

    #[test]
    fn or_backtracks_to_entry() {
        let c = or_(and_(lit(b'a'), lit(b'b')), and_(lit(b'a'), lit(b'c')));
        assert_eq!(run(&c, "ac"), (Status::Match, 2));
        assert_eq!(run(&c, "ad"), (Status::NotMatch, 0));
    }

    #[test]
    fn optional_always_matches() {
        let c = optional(lit(b'x'));
        assert_eq!(run(&c, "x"), (Status::Match, 1));
        assert_eq!(run(&c, "y"), (Status::Match, 0));
    }

    #[test]
    fn repeat_needs_one() {
        let digits = repeat(range(b'0', b'9'));
        assert_eq!(run(&digits, "123a"), (Status::Match, 3));
        assert_eq!(run(&digits, "a"), (Status::NotMatch, 0));
    }

    #[test]
    fn repeat_detects_non_advancing_child() {
        let looping = repeat(proxy(|_seq: &mut Sequencer<'_>, _: &mut LexContext, _: &mut ()| {
            Status::Match
        }));
        let mut seq = Sequencer::new("abc");
        let mut ctx = LexContext::new();
        assert_eq!(looping.parse(&mut seq, &mut ctx, &mut ()), Status::Fatal);
        assert_eq!(ctx.errbuf, "detect infinity loop at 0\n");
    }

    #[test]
    fn limited_repeat_bounds() {
        let two_to_three = limited_repeat(2, 3, range(b'0', b'9'));
        assert_eq!(run(&two_to_three, "1"), (Status::NotMatch, 0));
        assert_eq!(run(&two_to_three, "12"), (Status::Match, 2));
        assert_eq!(run(&two_to_three, "1234"), (Status::Match, 3));
    }

    #[test]
    fn must_match_never_returns_not_match() {
        let cut = must_match(lit(b'a'));
        assert_eq!(run(&cut, "a"), (Status::Match, 1));
        assert_eq!(run(&cut, "b").0, Status::Fatal);
    }

    #[test]
    fn fatal_short_circuits() {
        let inner = and_(lit(b'('), must_match(lit(b')')));
        let c = or_(inner, lit(b'('));
        // the second branch would match, but the cut in the first aborts
        assert_eq!(run(&c, "(x").0, Status::Fatal);
    }

    #[test]
    fn eos_in_sequences() {
        let c = and_(repeat(range(b'a', b'z')), Eos);
        assert_eq!(run(&c, "abc"), (Status::Match, 3));
        assert_eq!(run(&c, "abc1"), (Status::NotMatch, 0));
    }
}
