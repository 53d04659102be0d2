//! Lowering of the meta-AST into a runtime combinator table.


use std::rc::Rc;

use indexmap::IndexMap;

use comb2::basic::{
    Null, and_, capture, lit, must_match, not_, optional, optional_repeat, or_, peek, range,
    repeat, urange,
};
use comb2::tree::{Node, TreeContext};
use comb2::{Combinator, Context as _, DynCombinator, Sequencer, Shape, Status};

use crate::driver::{CallStack, RuleRef};
use crate::escape::{EscapeError, unescape_str};
use crate::meta::NodeKind;
use crate::meta::description::Description;

/// Context threaded through a compiled grammar: the output tree plus the
/// diagnostic log.
pub(crate) type RuleContext = TreeContext<String>;

/// A compiled rule body.
pub(crate) type Rule = DynCombinator<RuleContext, Grammar>;

/// A compiled grammar: the rule table plus the per-parse driver state.
///
/// Rules are stored behind `Rc` so a rule can be invoked while the table
/// itself is threaded through the parse as the recursion environment.
#[derive(Debug)]
pub struct Grammar {
    pub(crate) desc: Description,
    pub(crate) rules: IndexMap<String, Rc<Rule>>,
    pub(crate) call_stack: CallStack,
    pub(crate) inner_atomic_rules: bool,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to compile rule {rule}: {kind}")]
pub struct CompileError {
    pub rule: String,
    pub kind: CompileErrorKind,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileErrorKind {
    #[error("invalid escape in literal: {0}")]
    Escape(#[from] EscapeError),
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("group must have exactly one child")]
    MalformedGroup,
    #[error("primary must have one or two children")]
    MalformedPrimary,
    #[error("sequence must have at least one child")]
    EmptySequence,
    #[error("ordered choice must have at least one child")]
    EmptyChoice,
    #[error("range group must have at least one range")]
    EmptyRangeGroup,
    #[error("unknown postfix operator: {0}")]
    UnknownPostfix(String),
    #[error("malformed definition body: {0}")]
    Malformed(&'static str),
    #[error("unsupported node kind in definition body: {0}")]
    Unsupported(NodeKind),
}

impl Grammar {
    /// Lowers every rule body; validation failures never produce a partial
    /// grammar. The `eof` rule is predefined.
    pub fn compile(desc: Description) -> Result<Grammar, CompileError> {
        let mut rules: IndexMap<String, Rc<Rule>> = IndexMap::new();
        rules.insert("eof".to_string(), Rc::new(DynCombinator::new(EofRule)));
        for (name, body) in &desc.definitions {
            let compiled = compile_body(body).map_err(|kind| CompileError {
                rule: name.clone(),
                kind,
            })?;
            // leading auto-rule application, then the body
            let entry = and_(WithAutoRule::new(DynCombinator::new(Null)), compiled);
            rules.insert(name.clone(), Rc::new(DynCombinator::new(entry)));
        }
        Ok(Grammar {
            desc,
            rules,
            call_stack: CallStack::default(),
            inner_atomic_rules: false,
        })
    }

    pub fn description(&self) -> &Description {
        &self.desc
    }
}

fn compile_body(node: &Node<NodeKind>) -> Result<Rule, CompileErrorKind> {
    match node {
        Node::Token(t) if t.tag == NodeKind::Literal => {
            // strip the surrounding quotes, resolve escapes
            let inner = &t.text[1..t.text.len() - 1];
            let unescaped = unescape_str(inner)?;
            Ok(DynCombinator::new(lit(unescaped)))
        }
        Node::Token(t) if t.tag == NodeKind::Ident => {
            Ok(DynCombinator::new(RuleRef::new(t.text.clone())))
        }
        Node::Group(g) => match g.tag {
            Some(NodeKind::Group) => {
                if g.children.len() != 1 {
                    return Err(CompileErrorKind::MalformedGroup);
                }
                compile_body(&g.children[0])
            }
            Some(NodeKind::RangeGroup) => compile_range_group(&g.children),
            Some(NodeKind::Primary) => compile_primary(&g.children),
            Some(NodeKind::Sequence) => compile_indexed(&g.children, NodeKind::Sequence),
            Some(NodeKind::OrderedChoice) => compile_indexed(&g.children, NodeKind::OrderedChoice),
            Some(other) => Err(CompileErrorKind::Unsupported(other)),
            None => Err(CompileErrorKind::Malformed("untagged group in body")),
        },
        Node::Token(t) => Err(CompileErrorKind::Unsupported(t.tag)),
    }
}

/// A character class becomes an ordered choice of single characters and
/// ranges, scalar-captured under the class's source form (e.g. `[a-z]`).
fn compile_range_group(children: &[Node<NodeKind>]) -> Result<Rule, CompileErrorKind> {
    let mut tag = String::from("[");
    let mut body: Option<Rule> = None;
    for child in children {
        let elem = child
            .as_token()
            .filter(|t| t.tag == NodeKind::Range)
            .ok_or(CompileErrorKind::Malformed("range group's child is not a range"))?;
        tag.push_str(&elem.text);
        let chars: Vec<char> = elem.text.chars().collect();
        let piece: Rule = match chars.as_slice() {
            [c] => DynCombinator::new(lit(*c)),
            [lo, '-', hi] => {
                if lo > hi {
                    return Err(CompileErrorKind::InvalidRange(elem.text.clone()));
                }
                if lo.is_ascii() && hi.is_ascii() {
                    DynCombinator::new(range(*lo as u8, *hi as u8))
                } else {
                    DynCombinator::new(urange(*lo, *hi))
                }
            }
            _ => return Err(CompileErrorKind::InvalidRange(elem.text.clone())),
        };
        body = Some(match body {
            None => piece,
            Some(prev) => DynCombinator::new(or_(prev, piece)),
        });
    }
    let body = body.ok_or(CompileErrorKind::EmptyRangeGroup)?;
    tag.push(']');
    Ok(DynCombinator::new(WithAutoRule::new(DynCombinator::new(
        capture(tag, body),
    ))))
}

fn compile_primary(children: &[Node<NodeKind>]) -> Result<Rule, CompileErrorKind> {
    if children.is_empty() || children.len() > 2 {
        return Err(CompileErrorKind::MalformedPrimary);
    }
    let mut body = compile_body(&children[0])?;
    if let Some(op) = children.get(1) {
        let tok = op
            .as_token()
            .filter(|t| t.tag == NodeKind::Token)
            .ok_or(CompileErrorKind::Malformed("postfix is not a token"))?;
        body = match tok.text.as_str() {
            "+" => DynCombinator::new(repeat(body)),
            "*" => DynCombinator::new(optional_repeat(body)),
            "?" => DynCombinator::new(optional(body)),
            "!" => DynCombinator::new(must_match(body)),
            "+!" => DynCombinator::new(must_match(repeat(body))),
            "^" => DynCombinator::new(peek(body)),
            "~" => DynCombinator::new(not_(body)),
            other => return Err(CompileErrorKind::UnknownPostfix(other.to_string())),
        };
    }
    Ok(DynCombinator::new(WithAutoRule::new(body)))
}

/// Sequences and choices fold left; with more than one child, every child
/// is framed with its position so recursion checks and diagnostics can
/// name it.
fn compile_indexed(children: &[Node<NodeKind>], kind: NodeKind) -> Result<Rule, CompileErrorKind> {
    if children.is_empty() {
        return Err(match kind {
            NodeKind::Sequence => CompileErrorKind::EmptySequence,
            _ => CompileErrorKind::EmptyChoice,
        });
    }
    if children.len() == 1 {
        return compile_body(&children[0]);
    }
    let max_index = children.len() - 1;
    let mut acc: Option<Rule> = None;
    for (index, child) in children.iter().enumerate() {
        let part = compile_body(child)?;
        let indexed: Rule = DynCombinator::new(Indexed {
            kind,
            index,
            max_index,
            inner: part,
        });
        acc = Some(match acc {
            None => indexed,
            Some(prev) => match kind {
                NodeKind::Sequence => DynCombinator::new(and_(prev, indexed)),
                _ => DynCombinator::new(or_(prev, indexed)),
            },
        });
    }
    Ok(acc.expect("at least two children"))
}

/// After a successful match outside a token scope, applies every `auto!`
/// rule in declaration order as if sequenced behind the site.
pub(crate) struct WithAutoRule {
    inner: Rule,
}

impl WithAutoRule {
    pub(crate) fn new(inner: Rule) -> Self {
        Self { inner }
    }
}

impl Shape for WithAutoRule {}

impl Combinator<RuleContext, Grammar> for WithAutoRule {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut RuleContext, rec: &mut Grammar) -> Status {
        let res = self.inner.parse(seq, ctx, rec);
        if res != Status::Match || rec.inner_atomic_rules || rec.desc.auto_rules.is_empty() {
            return res;
        }
        rec.inner_atomic_rules = true;
        for i in 0..rec.desc.auto_rules.len() {
            let name = rec
                .desc
                .auto_rules
                .get_index(i)
                .expect("auto rule index in range")
                .clone();
            let Some(rule) = rec.rules.get(&name).map(Rc::clone) else {
                ctx.report_error(seq, format_args!("undefined reference to auto rule: {name}"));
                rec.inner_atomic_rules = false;
                return Status::Fatal;
            };
            let status = rule.parse(seq, ctx, rec);
            if status != Status::Match {
                rec.inner_atomic_rules = false;
                return status;
            }
        }
        rec.inner_atomic_rules = false;
        res
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut RuleContext, rec: &mut Grammar) {
        self.inner.must_match_error(seq, ctx, rec);
    }
}

/// Records the position of a sequence/choice child on the call stack for
/// the duration of its parse.
pub(crate) struct Indexed {
    kind: NodeKind,
    index: usize,
    max_index: usize,
    inner: Rule,
}

impl Shape for Indexed {}

impl Combinator<RuleContext, Grammar> for Indexed {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut RuleContext, rec: &mut Grammar) -> Status {
        rec.call_stack
            .push_kind(seq.rptr, self.kind, self.index, self.max_index);
        let res = self.inner.parse(seq, ctx, rec);
        rec.call_stack.pop();
        res
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut RuleContext, rec: &mut Grammar) {
        self.inner.must_match_error(seq, ctx, rec);
    }
}

/// The predefined `eof` rule.
pub(crate) struct EofRule;

impl Shape for EofRule {}

impl Combinator<RuleContext, Grammar> for EofRule {
    fn parse(&self, seq: &mut Sequencer<'_>, _ctx: &mut RuleContext, _rec: &mut Grammar) -> Status {
        if seq.eos() { Status::Match } else { Status::NotMatch }
    }

    fn must_match_error(&self, seq: &mut Sequencer<'_>, ctx: &mut RuleContext, _rec: &mut Grammar) {
        if !seq.eos() {
            ctx.report_error(seq, format_args!("expected end of file"));
        }
    }
}
