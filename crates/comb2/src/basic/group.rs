//! Tagged productions: structural groups and scalar captures.

use std::fmt;

use crate::combinator::{Combinator, Shape};
use crate::context::Context;
use crate::pos::Pos;
use crate::sequencer::Sequencer;
use crate::status::Status;

/// A named structural production: brackets `A` with `begin_group` /
/// `end_group`, recording the matched span.
#[derive(Debug, Clone)]
pub struct Group<T, A> {
    tag: T,
    a: A,
}

pub fn group<T, A>(tag: T, a: A) -> Group<T, A> {
    Group { tag, a }
}

impl<T, A> Shape for Group<T, A> {}

impl<C, R, T, A> Combinator<C, R> for Group<T, A>
where
    C: Context<Tag = T>,
    T: Clone + fmt::Display,
    A: Combinator<C, R>,
{
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        ctx.begin_group(&self.tag);
        let begin = seq.rptr;
        let res = self.a.parse(seq, ctx, rec);
        let pos = Pos::new(begin, seq.rptr);
        ctx.end_group(res, &self.tag, pos);
        res
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        ctx.report_error(seq, format_args!("not match to group. tag: {}", self.tag));
        self.a.must_match_error(seq, ctx, rec);
    }
}

/// A named scalar capture: the matched substring becomes a token leaf.
/// While the capture is open, provisional-tree creation is suppressed, so
/// nested captures and groups inside it leave no structural trace.
#[derive(Debug, Clone)]
pub struct Capture<T, A> {
    tag: T,
    a: A,
}

pub fn capture<T, A>(tag: T, a: A) -> Capture<T, A> {
    Capture { tag, a }
}

impl<T, A> Shape for Capture<T, A> {}

impl<C, R, T, A> Combinator<C, R> for Capture<T, A>
where
    C: Context<Tag = T>,
    T: Clone + fmt::Display,
    A: Combinator<C, R>,
{
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        let begin = seq.rptr;
        ctx.begin_string(&self.tag);
        let mut res = self.a.parse(seq, ctx, rec);
        let pos = Pos::new(begin, seq.rptr);
        // the hook may reject the captured text and downgrade the status
        let seq_view = &*seq;
        ctx.end_string(&mut res, &self.tag, seq_view, pos);
        res
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        ctx.report_error(seq, format_args!("not match to string. tag: {}", self.tag));
        self.a.must_match_error(seq, ctx, rec);
    }
}
