//! Closure recognizers.

use crate::combinator::{Combinator, Shape};
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::Status;

/// Wraps an arbitrary recognizer function together with an optional cut
/// diagnostic hook (invoked through `must_match_error`).
#[derive(Debug, Clone)]
pub struct Proxy<F, E> {
    fun: F,
    on_fail: E,
}

impl<F, E> Shape for Proxy<F, E> {}

fn silent_fail<C, R>(_seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R) {}

/// A proxy whose cut diagnostic is silent.
pub fn proxy<C, R, F>(fun: F) -> Proxy<F, fn(&mut Sequencer<'_>, &mut C, &mut R)>
where
    C: Context,
    F: Fn(&mut Sequencer<'_>, &mut C, &mut R) -> Status,
{
    Proxy {
        fun,
        on_fail: silent_fail::<C, R>,
    }
}

/// A proxy with a cut diagnostic hook.
pub fn proxy_with<C, R, F, E>(fun: F, on_fail: E) -> Proxy<F, E>
where
    C: Context,
    F: Fn(&mut Sequencer<'_>, &mut C, &mut R) -> Status,
    E: Fn(&mut Sequencer<'_>, &mut C, &mut R),
{
    Proxy { fun, on_fail }
}

impl<C, R, F, E> Combinator<C, R> for Proxy<F, E>
where
    C: Context,
    F: Fn(&mut Sequencer<'_>, &mut C, &mut R) -> Status,
    E: Fn(&mut Sequencer<'_>, &mut C, &mut R),
{
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        (self.fun)(seq, ctx, rec)
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) {
        (self.on_fail)(seq, ctx, rec)
    }
}
