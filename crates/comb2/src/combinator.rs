//! The combinator contract.

use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::Status;

/// A parser value.
///
/// `rec` is the recursion environment: an arbitrary caller-owned value that
/// combinators thread through unchanged. Grammar interpreters use it to tie
/// rule references back to a rule table; simple recognizers pass `&mut ()`.
///
/// `must_match_error` is the cut diagnostic: when a [`MustMatch`] wrapper
/// fails it asks the failed child to describe itself. The default is silent;
/// combinators that know their shape override it.
///
/// [`MustMatch`]: crate::basic::MustMatch
pub trait Combinator<C: Context, R> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status;

    fn must_match_error(&self, _seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) {}
}

/// Compile-time shape facts about a combinator type.
///
/// `repeat(optional(x))` always succeeds without consuming and would loop
/// forever; the constructors of `repeat` and `limited_repeat` reject that
/// shape through this marker (write `optional(repeat(x))` instead).
pub trait Shape {
    const IS_OPTIONAL: bool = false;
}

impl<T: Combinator<C, R> + ?Sized, C: Context, R> Combinator<C, R> for &T {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        (**self).parse(seq, ctx, rec)
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        (**self).must_match_error(seq, ctx, rec)
    }
}

impl<T: Combinator<C, R> + ?Sized, C: Context, R> Combinator<C, R> for Box<T> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        (**self).parse(seq, ctx, rec)
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        (**self).must_match_error(seq, ctx, rec)
    }
}

impl<T: Combinator<C, R> + ?Sized, C: Context, R> Combinator<C, R> for std::rc::Rc<T> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        (**self).parse(seq, ctx, rec)
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        (**self).must_match_error(seq, ctx, rec)
    }
}
