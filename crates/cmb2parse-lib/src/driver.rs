//! The recursion-safe driver.
//!
//! Named-rule dispatch goes through [`RuleRef`]: every invocation pushes a
//! call-stack frame, and before dispatching the stack is scanned for a
//! frame of the same rule that has not advanced the cursor — the signature
//! of left or infinite recursion, which aborts the parse instead of
//! overflowing the native stack.


use std::rc::Rc;

use comb2::tree::GroupNode;
use comb2::{Combinator, Context as _, Pos, Sequencer, Shape, Status};

use crate::compile::{Grammar, Rule, RuleContext};
use crate::error::ParseError;
use crate::meta::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecursionKind {
    None,
    /// The rule re-enters itself through an ordered choice without having
    /// consumed anything; a grammar rewrite could fix it.
    Left,
    /// The rule re-enters itself without any choice point in between.
    Infinity,
}

#[derive(Debug, Clone)]
enum Location {
    Named(String),
    Kind {
        kind: NodeKind,
        #[allow(dead_code)] // recorded for diagnostics
        index: usize,
        #[allow(dead_code)]
        max_index: usize,
    },
}

#[derive(Debug, Clone)]
struct Frame {
    pos: usize,
    location: Location,
}

/// Stack of named-rule and sequence/choice-position frames, used only for
/// recursion classification.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub(crate) fn push_named(&mut self, pos: usize, name: String) {
        self.frames.push(Frame {
            pos,
            location: Location::Named(name),
        });
    }

    pub(crate) fn push_kind(&mut self, pos: usize, kind: NodeKind, index: usize, max_index: usize) {
        self.frames.push(Frame {
            pos,
            location: Location::Kind {
                kind,
                index,
                max_index,
            },
        });
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Walks the stack from the top. The first frame of the same rule
    /// classifies the call: advanced cursor means ordinary recursion; a
    /// stalled cursor is left recursion when an ordered-choice frame sits
    /// above the match, otherwise plain infinite recursion.
    pub fn check_recursion(&self, name: &str, pos: usize) -> RecursionKind {
        let mut saw_choice = false;
        for frame in self.frames.iter().rev() {
            match &frame.location {
                Location::Named(n) if n == name => {
                    return if pos > frame.pos {
                        RecursionKind::None
                    } else if saw_choice {
                        RecursionKind::Left
                    } else {
                        RecursionKind::Infinity
                    };
                }
                Location::Kind {
                    kind: NodeKind::OrderedChoice,
                    ..
                } => saw_choice = true,
                _ => {}
            }
        }
        RecursionKind::None
    }
}

/// Invocation of a rule by name, resolved through the rule table at parse
/// time. Token rules run inside a scalar capture tagged with the rule name
/// and set the atomic flag for their duration; other defined rules run
/// inside a structural group; the predefined `eof` runs bare.
#[derive(Debug, Clone)]
pub(crate) struct RuleRef {
    name: String,
}

impl RuleRef {
    pub(crate) fn new(name: String) -> Self {
        Self { name }
    }

    fn dispatch(
        &self,
        rule: &Rc<Rule>,
        seq: &mut Sequencer<'_>,
        ctx: &mut RuleContext,
        rec: &mut Grammar,
    ) -> Status {
        let entry = seq.rptr;
        if rec.desc.tokens.contains(&self.name) {
            let saved = rec.inner_atomic_rules;
            rec.inner_atomic_rules = true;
            ctx.begin_string(&self.name);
            let mut res = rule.parse(seq, ctx, rec);
            let pos = Pos::new(entry, seq.rptr);
            ctx.end_string(&mut res, &self.name, seq, pos);
            rec.inner_atomic_rules = saved;
            if res == Status::NotMatch {
                seq.rptr = entry;
            }
            res
        } else if rec.desc.definitions.contains_key(&self.name) {
            ctx.begin_group(&self.name);
            let res = rule.parse(seq, ctx, rec);
            ctx.end_group(res, &self.name, Pos::new(entry, seq.rptr));
            res
        } else {
            rule.parse(seq, ctx, rec)
        }
    }
}

impl Shape for RuleRef {}

impl Combinator<RuleContext, Grammar> for RuleRef {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut RuleContext, rec: &mut Grammar) -> Status {
        let Some(rule) = rec.rules.get(&self.name).map(Rc::clone) else {
            ctx.report_error(
                seq,
                format_args!("undefined reference to rule: {}", self.name),
            );
            return Status::Fatal;
        };
        if rec.call_stack.check_recursion(&self.name, seq.rptr) != RecursionKind::None {
            ctx.report_error(
                seq,
                format_args!("left recursion detected for rule: {}", self.name),
            );
            return Status::Fatal;
        }
        rec.call_stack.push_named(seq.rptr, self.name.clone());
        let res = self.dispatch(&rule, seq, ctx, rec);
        rec.call_stack.pop();
        res
    }

    // reports by name only; descending into a recursive rule body would
    // re-enter this hook without bound
    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut RuleContext, rec: &mut Grammar) {
        if rec.rules.contains_key(&self.name) {
            ctx.report_error(seq, format_args!("not match to rule: {}", self.name));
        } else {
            ctx.report_error(
                seq,
                format_args!("undefined reference to rule: {}", self.name),
            );
        }
    }
}

impl Grammar {
    /// Parses `input` from the root rule. Success requires both a `Match`
    /// and full consumption of the input; anything else carries the
    /// accumulated diagnostics and the stop location.
    pub fn parse(&mut self, input: &str) -> Result<GroupNode<String>, ParseError> {
        let mut seq = Sequencer::new(input);
        let mut ctx = RuleContext::new();
        let root = RuleRef::new(self.desc.root_name.clone());
        let status = root.parse(&mut seq, &mut ctx, self);
        self.call_stack.clear();
        self.inner_atomic_rules = false;
        if status == Status::Match && seq.eos() {
            return Ok(ctx.table.collect());
        }
        if status == Status::Match {
            ctx.log.push("parser stopped before end of input".to_string());
        }
        Err(ParseError::at(ctx.log, seq.rptr, input))
    }
}
