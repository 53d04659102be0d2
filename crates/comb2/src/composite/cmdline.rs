//! Command-line splitting.
//!
//! Splits a whitespace-delimited argument stream, honoring quoted
//! segments, and hands each argument to a callback together with its kind,
//! span and index. The callback may veto an argument, which aborts the
//! scan fatally.

use std::fmt;

use crate::basic::{Eos, Uany, and_, capture, not_, optional, or_, repeat};
use crate::combinator::{Combinator, Shape};
use crate::composite::range::{eol, space, tab};
use crate::composite::string::{c_str_weak, char_str_weak};
use crate::context::Context;
use crate::pos::Pos;
use crate::sequencer::Sequencer;
use crate::status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A quoted argument, quotes included in the span.
    StrArg,
    /// A bare argument.
    Arg,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::StrArg => write!(f, "str_arg"),
            ArgType::Arg => write!(f, "arg"),
        }
    }
}

struct ArgCollector<F> {
    cb: F,
    counter: usize,
}

impl<F> Context for ArgCollector<F>
where
    F: FnMut(ArgType, &Sequencer<'_>, Pos, usize) -> bool,
{
    type Tag = ArgType;

    fn end_string(&mut self, status: &mut Status, tag: &ArgType, seq: &Sequencer<'_>, pos: Pos) {
        if *status == Status::Match {
            if !(self.cb)(*tag, seq, pos, self.counter) {
                *status = Status::Fatal;
            }
            self.counter += 1;
        }
    }
}

fn blank<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    or_(or_(space(), tab()), eol())
}

fn splitter<C: Context<Tag = ArgType>, R>() -> impl Combinator<C, R> + Shape + Clone {
    let str_arg = capture(
        ArgType::StrArg,
        and_(
            or_(c_str_weak(), char_str_weak()),
            crate::basic::peek(or_(blank(), Eos)),
        ),
    );
    let arg = capture(
        ArgType::Arg,
        repeat(and_(not_(or_(blank(), Eos)), Uany)),
    );
    let blanks = optional(repeat(blank()));
    and_(
        blanks.clone(),
        optional(repeat(and_(or_(str_arg, arg), blanks))),
    )
}

/// Scans `input`, invoking `cb` once per argument. Returns the number of
/// arguments delivered.
pub fn command_line_callback<F>(input: &str, cb: F) -> usize
where
    F: FnMut(ArgType, &Sequencer<'_>, Pos, usize) -> bool,
{
    let mut seq = Sequencer::new(input);
    let mut ctx = ArgCollector { cb, counter: 0 };
    let _ = splitter().parse(&mut seq, &mut ctx, &mut ());
    ctx.counter
}

/// Collects the arguments of `input`. Quoted arguments are passed through
/// `unescape` (quotes included), bare arguments are taken verbatim.
pub fn command_line(input: &str, unescape: impl Fn(&str) -> String) -> Vec<String> {
    let mut out = Vec::new();
    command_line_callback(input, |kind, seq, pos, _idx| {
        let text = seq.text(pos);
        match kind {
            ArgType::StrArg => out.push(unescape(&text)),
            ArgType::Arg => out.push(text.into_owned()),
        }
        true
    });
    out
}
