//! Provisional tree recording and collection.

mod branch_table;
mod node;

pub use branch_table::{BranchTable, RawEvent};
pub use node::{GroupNode, Node, TokenNode, VisitEvent};

use std::fmt;

use crate::context::Context;
use crate::pos::Pos;
use crate::sequencer::Sequencer;
use crate::status::{CallbackKind, Status};

/// A ready-made context: a [`BranchTable`] plus an error-message log.
#[derive(Debug, Clone)]
pub struct TreeContext<T> {
    pub table: BranchTable<T>,
    pub log: Vec<String>,
}

impl<T: Clone> TreeContext<T> {
    pub fn new() -> Self {
        Self {
            table: BranchTable::new(),
            log: Vec::new(),
        }
    }
}

impl<T: Clone> Default for TreeContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + fmt::Display> Context for TreeContext<T> {
    type Tag = T;

    fn begin_group(&mut self, tag: &T) {
        self.table.begin_group(tag);
    }

    fn end_group(&mut self, status: Status, tag: &T, pos: Pos) {
        self.table.end_group(status, tag, pos);
    }

    fn begin_string(&mut self, tag: &T) {
        self.table.begin_string(tag);
    }

    fn end_string(&mut self, status: &mut Status, tag: &T, seq: &Sequencer<'_>, pos: Pos) {
        self.table.end_string(*status, tag, seq, pos);
    }

    fn logic_entry(&mut self, kind: CallbackKind) {
        self.table.logic_entry(kind);
    }

    fn logic_result(&mut self, kind: CallbackKind, status: Status) {
        self.table.logic_result(kind, status);
    }

    fn report_error(&mut self, _seq: &Sequencer<'_>, args: fmt::Arguments<'_>) {
        self.log.push(args.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{and_, capture, group, lit, not_, optional, or_, peek, range, repeat};
    use crate::combinator::Combinator;

    fn fmt_node(node: &Node<&'static str>, depth: usize, out: &mut String) {
        let pad = "  ".repeat(depth);
        match node {
            Node::Group(g) => {
                out.push_str(&format!("{pad}{}\n", g.tag.unwrap_or("<root>")));
                for child in &g.children {
                    fmt_node(child, depth + 1, out);
                }
            }
            Node::Token(t) => {
                out.push_str(&format!("{pad}{}: {:?}\n", t.tag, t.text));
            }
        }
    }

    fn render(ctx: &TreeContext<&'static str>) -> String {
        let root = ctx.table.collect();
        let mut out = String::from("<root>\n");
        for child in &root.children {
            fmt_node(child, 1, &mut out);
        }
        out
    }

    fn word() -> impl Combinator<TreeContext<&'static str>, ()> {
        capture("word", repeat(range(b'a', b'z')))
    }

    #[test]
    fn groups_nest_and_capture() {
        let item = group("item", and_(word(), optional(lit(b' '))));
        let items = group("items", repeat(item));
        let mut seq = Sequencer::new("a b c");
        let mut ctx = TreeContext::new();
        assert_eq!(items.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        insta::assert_snapshot!(render(&ctx), @r#"
        <root>
          items
            item
              word: "a"
            item
              word: "b"
            item
              word: "c"
        "#);
    }

    #[test]
    fn failed_branch_is_discarded() {
        // first alternative captures a word but then requires '!', which is
        // absent; its provisional frame must vanish
        let c = or_(
            group("bang", and_(word(), lit(b'!'))),
            group("plain", word()),
        );
        let mut seq = Sequencer::new("abc");
        let mut ctx = TreeContext::new();
        assert_eq!(c.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        insta::assert_snapshot!(render(&ctx), @r#"
        <root>
          plain
            word: "abc"
        "#);
    }

    #[test]
    fn peek_commits_nothing() {
        let c = and_(peek(word()), group("g", word()));
        let mut seq = Sequencer::new("abc");
        let mut ctx = TreeContext::new();
        assert_eq!(c.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        let root = ctx.table.collect();
        assert_eq!(root.children.len(), 1);
        insta::assert_snapshot!(render(&ctx), @r#"
        <root>
          g
            word: "abc"
        "#);
    }

    #[test]
    fn capture_suppresses_inner_structure() {
        let inner = group("inner", repeat(range(b'0', b'9')));
        let c = capture("num", inner);
        let mut seq = Sequencer::new("42");
        let mut ctx = TreeContext::new();
        assert_eq!(c.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        insta::assert_snapshot!(render(&ctx), @r#"
        <root>
          num: "42"
        "#);
    }

    #[test]
    fn lexer_mode_hides_logic_frames() {
        let c = repeat(or_(capture("a", lit(b'a')), capture("b", lit(b'b'))));
        let mut ctx = TreeContext::new();
        ctx.table.lexer_mode = true;
        let mut seq = Sequencer::new("abab");
        assert_eq!(c.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        let root = ctx.table.collect();
        assert_eq!(root.children.len(), 4);
    }

    #[test]
    fn negative_lookahead_commits_nothing() {
        let c = and_(not_(lit(b'!')), group("g", word()));
        let mut seq = Sequencer::new("ok");
        let mut ctx = TreeContext::new();
        assert_eq!(c.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        assert_eq!(ctx.table.collect().children.len(), 1);
    }

    #[test]
    fn flattened_visit_skips_branches() {
        let item = group("item", and_(word(), optional(lit(b' '))));
        let items = group("items", repeat(item));
        let mut seq = Sequencer::new("a b");
        let mut ctx = TreeContext::new();
        assert_eq!(items.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        let mut trace = Vec::new();
        ctx.table.visit_nodes(&mut |event| {
            trace.push(match event {
                VisitEvent::EnterGroup(tag, _) => format!(">{tag}"),
                VisitEvent::LeaveGroup(tag, _) => format!("<{tag}"),
                VisitEvent::Token(tag, text, _) => format!("{tag}={text}"),
            });
        });
        assert_eq!(
            trace,
            vec![">items", ">item", "word=a", "<item", ">item", "word=b", "<item", "<items"]
        );
    }

    #[test]
    fn raw_visit_exposes_branches() {
        let c = or_(capture("x", lit(b'x')), capture("y", lit(b'y')));
        let mut seq = Sequencer::new("y");
        let mut ctx = TreeContext::new();
        assert_eq!(c.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
        let mut branches = 0;
        let mut tokens = 0;
        ctx.table.visit_raw(&mut |event| match event {
            RawEvent::EnterBranch => branches += 1,
            RawEvent::Token(..) => tokens += 1,
            _ => {}
        });
        assert!(branches >= 1);
        assert_eq!(tokens, 1);
    }
}
