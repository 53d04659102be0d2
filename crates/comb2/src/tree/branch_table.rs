//! Provisional parse-tree recorder.
//!
//! Mirrors the combinator call pattern: logic entries push anonymous
//! branches, groups push tagged branches, scalar captures append leaves.
//! Frames opened by a production that ends in `NotMatch` are discarded when
//! the frame closes, so the committed tree only ever reflects input that
//! actually matched.
//!
//! Nodes live in an arena indexed by `usize`; the path from the root to the
//! open frame is a stack of arena indices, which replaces parent back-links.
//! Discarded subtrees simply become unreferenced arena entries.

use crate::pos::Pos;
use crate::sequencer::Sequencer;
use crate::status::{CallbackKind, Status};

#[derive(Debug, Clone)]
pub(crate) enum Elem<T> {
    Branch {
        children: Vec<usize>,
    },
    Group {
        tag: T,
        pos: Pos,
        children: Vec<usize>,
    },
    Ident {
        tag: T,
        text: String,
        pos: Pos,
    },
}

impl<T> Elem<T> {
    fn children_mut(&mut self) -> &mut Vec<usize> {
        match self {
            Elem::Branch { children } | Elem::Group { children, .. } => children,
            Elem::Ident { .. } => unreachable!("leaves have no children"),
        }
    }
}

/// Event stream of a raw traversal, anonymous branches included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent<'a, T> {
    EnterBranch,
    LeaveBranch,
    EnterGroup(&'a T, Pos),
    LeaveGroup(&'a T, Pos),
    Token(&'a T, &'a str, Pos),
}

#[derive(Debug, Clone)]
pub struct BranchTable<T> {
    pub(crate) nodes: Vec<Elem<T>>,
    stack: Vec<usize>,
    /// While non-zero, structural tree mutation is suppressed (inside a
    /// scalar capture or a peek region).
    str_count: usize,
    /// Hide anonymous logic frames from the committed tree, keeping only
    /// groups and captures.
    pub lexer_mode: bool,
}

impl<T: Clone> BranchTable<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Elem::Branch {
                children: Vec::new(),
            }],
            stack: vec![0],
            str_count: 0,
            lexer_mode: false,
        }
    }

    pub(crate) fn root(&self) -> usize {
        0
    }

    fn current(&self) -> usize {
        *self.stack.last().expect("branch stack is never empty")
    }

    fn push_child(&mut self, elem: Elem<T>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(elem);
        let current = self.current();
        self.nodes[current].children_mut().push(id);
        id
    }

    fn discard_last_child(&mut self) {
        let current = self.current();
        self.nodes[current].children_mut().pop();
    }

    pub fn begin_group(&mut self, tag: &T) {
        if self.str_count > 0 {
            return;
        }
        let id = self.push_child(Elem::Group {
            tag: tag.clone(),
            pos: Pos::NONE,
            children: Vec::new(),
        });
        self.stack.push(id);
    }

    pub fn end_group(&mut self, status: Status, _tag: &T, pos: Pos) {
        if self.str_count > 0 {
            return;
        }
        let current = self.current();
        match &mut self.nodes[current] {
            Elem::Group { pos: p, .. } => *p = pos,
            _ => debug_assert!(false, "end_group on a non-group frame"),
        }
        self.stack.pop();
        if status == Status::NotMatch {
            self.discard_last_child();
        }
    }

    pub fn logic_entry(&mut self, kind: CallbackKind) {
        if kind == CallbackKind::PeekBegin {
            self.str_count += 1;
            return;
        }
        if self.str_count > 0 || self.lexer_mode {
            return;
        }
        let id = self.push_child(Elem::Branch {
            children: Vec::new(),
        });
        self.stack.push(id);
    }

    pub fn logic_result(&mut self, kind: CallbackKind, status: Status) {
        if kind == CallbackKind::PeekEnd {
            self.str_count = self.str_count.saturating_sub(1);
            return;
        }
        if self.str_count > 0 || self.lexer_mode {
            return;
        }
        self.stack.pop();
        if status == Status::NotMatch {
            self.discard_last_child();
        }
    }

    pub fn begin_string(&mut self, _tag: &T) {
        self.str_count += 1;
    }

    pub fn end_string(&mut self, status: Status, tag: &T, seq: &Sequencer<'_>, pos: Pos) {
        self.str_count = self.str_count.saturating_sub(1);
        if self.str_count > 0 {
            return;
        }
        if status != Status::Match {
            return;
        }
        self.push_child(Elem::Ident {
            tag: tag.clone(),
            text: seq.text(pos).into_owned(),
            pos,
        });
    }

    /// Walks the committed tree including anonymous branches. Intended for
    /// debugging; ordinary consumers use `collect`.
    pub fn visit_raw<F>(&self, f: &mut F)
    where
        F: FnMut(RawEvent<'_, T>),
    {
        self.visit_raw_at(self.root(), f);
    }

    fn visit_raw_at<F>(&self, id: usize, f: &mut F)
    where
        F: FnMut(RawEvent<'_, T>),
    {
        match &self.nodes[id] {
            Elem::Branch { children } => {
                f(RawEvent::EnterBranch);
                for &child in children {
                    self.visit_raw_at(child, f);
                }
                f(RawEvent::LeaveBranch);
            }
            Elem::Group { tag, pos, children } => {
                f(RawEvent::EnterGroup(tag, *pos));
                for &child in children {
                    self.visit_raw_at(child, f);
                }
                f(RawEvent::LeaveGroup(tag, *pos));
            }
            Elem::Ident { tag, text, pos } => f(RawEvent::Token(tag, text, *pos)),
        }
    }
}

impl<T: Clone> Default for BranchTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
