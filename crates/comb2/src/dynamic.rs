//! Type-erased combinator handles.

use crate::combinator::{Combinator, Shape};
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::Status;

/// A value-semantic handle owning exactly one heap-allocated recognizer.
///
/// Grammar interpreters use this to store heterogeneous combinators in one
/// table: the context, recursion-environment and input types are fixed, the
/// recognizer behind the handle is erased. A default-constructed handle is
/// empty; invoking it reports `null pointer at type erased` and returns
/// `Fatal`.
pub struct DynCombinator<C: 'static, R: 'static> {
    inner: Option<Box<dyn Combinator<C, R>>>,
}

impl<C: Context + 'static, R: 'static> DynCombinator<C, R> {
    pub fn empty() -> Self {
        Self { inner: None }
    }

    pub fn new(combinator: impl Combinator<C, R> + 'static) -> Self {
        Self {
            inner: Some(Box::new(combinator)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }
}

impl<C: Context + 'static, R: 'static> Default for DynCombinator<C, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: 'static, R: 'static> Shape for DynCombinator<C, R> {}

impl<C: Context + 'static, R: 'static> Combinator<C, R> for DynCombinator<C, R> {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        match &self.inner {
            Some(c) => c.parse(seq, ctx, rec),
            None => {
                ctx.report_error(seq, format_args!("null pointer at type erased"));
                Status::Fatal
            }
        }
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        match &self.inner {
            Some(c) => c.must_match_error(seq, ctx, rec),
            None => ctx.report_error(seq, format_args!("null pointer at type erased")),
        }
    }
}

impl<C: 'static, R: 'static> std::fmt::Debug for DynCombinator<C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynCombinator")
            .field("empty", &self.inner.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{and_, lit, repeat};
    use crate::context::LexContext;

    #[test]
    fn erased_handle_parses() {
        let erased: DynCombinator<LexContext, ()> =
            DynCombinator::new(and_(lit(b'a'), repeat(lit(b'b'))));
        let mut seq = Sequencer::new("abb");
        let mut ctx = LexContext::new();
        assert_eq!(erased.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        assert_eq!(seq.rptr, 3);
    }

    #[test]
    fn empty_handle_is_fatal() {
        let empty: DynCombinator<LexContext, ()> = DynCombinator::empty();
        let mut seq = Sequencer::new("x");
        let mut ctx = LexContext::new();
        assert_eq!(empty.parse(&mut seq, &mut ctx, &mut ()), Status::Fatal);
        assert_eq!(ctx.errbuf, "null pointer at type erased\n");
    }

    #[test]
    fn handles_nest() {
        let inner: DynCombinator<LexContext, ()> = DynCombinator::new(lit(b'x'));
        let outer: DynCombinator<LexContext, ()> = DynCombinator::new(repeat(inner));
        let mut seq = Sequencer::new("xxx");
        assert_eq!(
            outer.parse(&mut seq, &mut LexContext::new(), &mut ()),
            Status::Match
        );
        assert_eq!(seq.rptr, 3);
    }
}
