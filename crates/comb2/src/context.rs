//! The context protocol.
//!
//! The engine never names a concrete context type. Every combinator invokes
//! a fixed set of optional hooks on whatever context the caller supplies;
//! an implementation opts in by overriding the methods it cares about and
//! inherits no-op defaults for the rest. This is the static rendering of a
//! duck-typed capability set: tree builders implement the group/string and
//! logic hooks, lexers only the string hooks, tests nothing at all.

use std::fmt;
use std::marker::PhantomData;

use crate::basic::UtfError;
use crate::pos::Pos;
use crate::sequencer::Sequencer;
use crate::status::{CallbackKind, Status};

pub trait Context {
    /// Tag attached to groups and scalar captures.
    type Tag: Clone + fmt::Display;

    /// Entering a structural group.
    fn begin_group(&mut self, _tag: &Self::Tag) {}

    /// Leaving a structural group; called on every exit path, `Fatal`
    /// included.
    fn end_group(&mut self, _status: Status, _tag: &Self::Tag, _pos: Pos) {}

    /// Entering a scalar capture; until the matching `end_string`,
    /// provisional-tree creation is suppressed.
    fn begin_string(&mut self, _tag: &Self::Tag) {}

    /// Leaving a scalar capture. The hook may downgrade the status (callers
    /// that reject the captured text turn a `Match` into `Fatal`).
    fn end_string(
        &mut self,
        _status: &mut Status,
        _tag: &Self::Tag,
        _seq: &Sequencer<'_>,
        _pos: Pos,
    ) {
    }

    /// Entry into an Or/Optional/Repeat/Peek frame.
    fn logic_entry(&mut self, _kind: CallbackKind) {}

    /// Result of an Or/Optional/Repeat/Peek frame; paired with
    /// `logic_entry` and strictly nested.
    fn logic_result(&mut self, _kind: CallbackKind, _status: Status) {}

    /// Human-readable diagnostic from the engine.
    fn report_error(&mut self, _seq: &Sequencer<'_>, _args: fmt::Arguments<'_>) {}

    /// Classify a UTF-8 decoding failure: `true` makes the production
    /// `Fatal`, `false` (the default) makes it a recoverable `NotMatch`.
    fn utf_error(&mut self, _seq: &Sequencer<'_>, _err: UtfError) -> bool {
        false
    }

    /// Required additional indent width for `More`-mode indentation, if any.
    fn expect_indent(&self) -> Option<usize> {
        None
    }

    /// Currently recorded indent width.
    fn indent(&self) -> usize {
        0
    }

    /// Record a new indent width.
    fn set_indent(&mut self, _width: usize) {}
}

/// A context that provides nothing: every hook is a no-op.
pub struct NullContext<T = &'static str>(PhantomData<T>);

impl<T> NullContext<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for NullContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + fmt::Display> Context for NullContext<T> {
    type Tag = T;
}

/// A lexing context: records the last committed capture and accumulates
/// diagnostics, without building any tree.
#[derive(Debug, Clone)]
pub struct LexContext<T = &'static str> {
    pub str_tag: Option<T>,
    pub str_pos: Pos,
    pub errbuf: String,
}

impl<T> LexContext<T> {
    pub fn new() -> Self {
        Self {
            str_tag: None,
            str_pos: Pos::NONE,
            errbuf: String::new(),
        }
    }
}

impl<T> Default for LexContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + fmt::Display> Context for LexContext<T> {
    type Tag = T;

    fn end_string(&mut self, status: &mut Status, tag: &T, _seq: &Sequencer<'_>, pos: Pos) {
        if *status == Status::Match {
            self.str_tag = Some(tag.clone());
            self.str_pos = pos;
        }
    }

    fn report_error(&mut self, _seq: &Sequencer<'_>, args: fmt::Arguments<'_>) {
        use fmt::Write;
        let _ = writeln!(self.errbuf, "{args}");
    }
}
