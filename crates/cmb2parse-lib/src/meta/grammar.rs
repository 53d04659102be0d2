//! The meta-grammar, written in the engine it feeds.
//!
//! ```text
//! root            := space* (body space*)* eos!
//! body            := tokenDef | groupDef | rootDef | omitOneDef | autoDef | definition
//! definition      := ident '='! body_expr eol_or_eos!
//! body_expr       := ordered_choice
//! ordered_choice  := sequence ( '/' sequence )*
//! sequence        := postfix ( postfix )*
//! postfix         := primary (postfix_token)?
//! postfix_token   := '+!' | '+' | '*' | '?' | '!' | '^' | '~'
//! primary         := literal | ident | range_group | '(' body_expr ')!'
//! range_group     := '[' range (range)* ']!'
//! range           := any ('-' any!)?
//! literal         := "..." | '...'
//! ```
//!
//! Rule-body recursion (`body_expr` inside parentheses and definitions)
//! ties back through a type-erased combinator carried in the recursion
//! environment.

use std::rc::Rc;

use comb2::basic::{
    Eos, Uany, and_, capture, group, lit, must_match, not_, optional, or_, proxy, repeat,
};
use comb2::composite::{c_ident, c_str, char_str, eol};
use comb2::tree::{GroupNode, TreeContext};
use comb2::{Combinator, DynCombinator, Sequencer, Shape, Status};

use crate::error::MetaError;

use super::node_kind::NodeKind;

pub(crate) type MetaContext = TreeContext<NodeKind>;

/// Recursion environment of the meta-grammar: the tied-off rule body.
pub(crate) struct MetaRec {
    body: Rc<DynCombinator<MetaContext, MetaRec>>,
}

fn space() -> impl Combinator<MetaContext, MetaRec> + Shape {
    or_(lit(b' '), lit(b'\t'))
}

fn spaces() -> impl Combinator<MetaContext, MetaRec> + Shape {
    optional(repeat(space()))
}

fn space_lines() -> impl Combinator<MetaContext, MetaRec> + Shape {
    optional(repeat(or_(space(), eol())))
}

fn eol_or_eos() -> impl Combinator<MetaContext, MetaRec> + Shape {
    or_(eol(), Eos)
}

fn ident() -> impl Combinator<MetaContext, MetaRec> + Shape {
    capture(NodeKind::Ident, c_ident())
}

fn literal() -> impl Combinator<MetaContext, MetaRec> + Shape {
    capture(NodeKind::Literal, or_(c_str(), char_str()))
}

/// Forwarding combinator for `body_expr`, resolved through the recursion
/// environment at parse time.
fn body_expr() -> impl Combinator<MetaContext, MetaRec> + Shape {
    proxy(
        |seq: &mut Sequencer<'_>, ctx: &mut MetaContext, rec: &mut MetaRec| {
            let body = Rc::clone(&rec.body);
            body.parse(seq, ctx, rec)
        },
    )
}

fn range_elem() -> impl Combinator<MetaContext, MetaRec> + Shape {
    capture(
        NodeKind::Range,
        and_(Uany, optional(and_(lit(b'-'), must_match(Uany)))),
    )
}

fn range_group() -> impl Combinator<MetaContext, MetaRec> + Shape {
    group(
        NodeKind::RangeGroup,
        and_(
            and_(
                lit(b'['),
                and_(
                    range_elem(),
                    optional(repeat(and_(not_(lit(b']')), range_elem()))),
                ),
            ),
            must_match(lit(b']')),
        ),
    )
}

fn group_expr() -> impl Combinator<MetaContext, MetaRec> + Shape {
    group(
        NodeKind::Group,
        and_(
            and_(and_(lit(b'('), spaces()), and_(body_expr(), spaces())),
            must_match(lit(b')')),
        ),
    )
}

fn primary() -> impl Combinator<MetaContext, MetaRec> + Shape {
    or_(or_(literal(), ident()), or_(range_group(), group_expr()))
}

fn postfix_token() -> impl Combinator<MetaContext, MetaRec> + Shape {
    capture(
        NodeKind::Token,
        or_(
            or_(lit(b'!'), and_(lit(b'+'), optional(lit(b'!')))),
            or_(or_(lit(b'^'), lit(b'~')), or_(lit(b'*'), lit(b'?'))),
        ),
    )
}

fn postfix() -> impl Combinator<MetaContext, MetaRec> + Shape {
    group(
        NodeKind::Primary,
        and_(primary(), optional(and_(spaces(), postfix_token()))),
    )
}

fn sequence() -> impl Combinator<MetaContext, MetaRec> + Shape {
    group(
        NodeKind::Sequence,
        and_(postfix(), optional(repeat(and_(spaces(), postfix())))),
    )
}

pub(crate) fn ordered_choice() -> impl Combinator<MetaContext, MetaRec> + Shape + 'static {
    group(
        NodeKind::OrderedChoice,
        and_(
            sequence(),
            optional(repeat(and_(
                and_(and_(spaces(), lit(b'/')), spaces()),
                sequence(),
            ))),
        ),
    )
}

fn some_idents_and_line() -> impl Combinator<MetaContext, MetaRec> + Shape {
    and_(
        and_(repeat(and_(spaces(), ident())), spaces()),
        must_match(eol_or_eos()),
    )
}

fn single_ident_and_line() -> impl Combinator<MetaContext, MetaRec> + Shape {
    and_(
        and_(and_(spaces(), must_match(ident())), spaces()),
        must_match(eol_or_eos()),
    )
}

fn definition() -> impl Combinator<MetaContext, MetaRec> + Shape {
    group(
        NodeKind::Definition,
        and_(
            and_(
                and_(ident(), spaces()),
                and_(must_match(lit(b'=')), spaces()),
            ),
            and_(
                and_(body_expr(), spaces()),
                must_match(eol_or_eos()),
            ),
        ),
    )
}

fn body() -> impl Combinator<MetaContext, MetaRec> + Shape {
    let token_def = group(
        NodeKind::TokenDefinition,
        and_(lit("token!"), some_idents_and_line()),
    );
    let group_def = group(
        NodeKind::GroupDefinition,
        and_(lit("group!"), some_idents_and_line()),
    );
    let root_def = group(
        NodeKind::RootDefinition,
        and_(lit("root!"), single_ident_and_line()),
    );
    let omit_one_def = group(
        NodeKind::OmitIfOneDefinition,
        and_(lit("omit_one!"), some_idents_and_line()),
    );
    let auto_def = group(
        NodeKind::AutoDefinition,
        and_(lit("auto!"), some_idents_and_line()),
    );
    or_(
        or_(or_(token_def, group_def), or_(root_def, omit_one_def)),
        or_(auto_def, definition()),
    )
}

fn root() -> impl Combinator<MetaContext, MetaRec> + Shape {
    and_(
        and_(space_lines(), optional(repeat(and_(body(), space_lines())))),
        must_match(Eos),
    )
}

/// Parses a grammar source into its meta-AST.
pub fn parse_grammar(source: &str) -> Result<GroupNode<NodeKind>, MetaError> {
    let mut seq = Sequencer::new(source);
    let mut ctx = MetaContext::new();
    let mut rec = MetaRec {
        body: Rc::new(DynCombinator::new(ordered_choice())),
    };
    let status = root().parse(&mut seq, &mut ctx, &mut rec);
    if status != Status::Match {
        return Err(MetaError::at(ctx.log, seq.rptr, source));
    }
    Ok(ctx.table.collect())
}
