//! A small configuration scanner assembled from the composite library and
//! driven through a tree-building context.

use comb2::basic::{Eos, and_, capture, group, lit, must_match, not_, optional_repeat, or_};
use comb2::composite::{c_ident, c_str, dec_integer, eol, shell_comment, space, tab};
use comb2::tree::TreeContext;
use comb2::{Combinator, Sequencer, Shape, Status};

type Ctx = TreeContext<&'static str>;

fn blanks() -> impl Combinator<Ctx, ()> + Shape {
    optional_repeat(or_(space(), tab()))
}

fn value() -> impl Combinator<Ctx, ()> + Shape {
    capture("value", or_(c_str(), dec_integer()))
}

/// `key = value`, cut after the key: a malformed entry is fatal.
fn entry() -> impl Combinator<Ctx, ()> + Shape {
    group(
        "entry",
        and_(
            and_(capture("key", c_ident()), blanks()),
            and_(and_(must_match(lit(b'=')), blanks()), must_match(value())),
        ),
    )
}

fn line_end() -> impl Combinator<Ctx, ()> + Shape {
    or_(eol(), Eos)
}

/// One line: a comment (which eats its own terminator), an entry, or blank.
fn line() -> impl Combinator<Ctx, ()> + Shape {
    and_(
        and_(not_(Eos), blanks()),
        or_(
            shell_comment(),
            or_(and_(entry(), line_end()), line_end()),
        ),
    )
}

fn config() -> impl Combinator<Ctx, ()> + Shape {
    and_(optional_repeat(line()), must_match(Eos))
}

#[test]
fn scans_entries_and_comments() {
    let input = "\
# demo config
name = \"combinator\"
retries = 3

";
    let mut seq = Sequencer::new(input);
    let mut ctx = Ctx::new();
    assert_eq!(config().parse(&mut seq, &mut ctx, &mut ()), Status::Match);
    assert!(seq.eos());

    let root = ctx.table.collect();
    let entries: Vec<(&str, &str)> = root
        .children
        .iter()
        .filter_map(|node| node.as_group())
        .map(|entry| {
            let key = entry.children[0].as_token().expect("key token");
            let value = entry.children[1].as_token().expect("value token");
            (key.text.as_str(), value.text.as_str())
        })
        .collect();
    assert_eq!(
        entries,
        vec![("name", "\"combinator\""), ("retries", "3")]
    );
}

#[test]
fn missing_value_reports_through_the_cut() {
    let mut seq = Sequencer::new("x = \n");
    let mut ctx = Ctx::new();
    assert_eq!(config().parse(&mut seq, &mut ctx, &mut ()), Status::Fatal);
    assert_eq!(ctx.log, vec!["not match to string. tag: value".to_string()]);
}

#[test]
fn garbage_line_is_fatal_at_the_end_check() {
    let mut seq = Sequencer::new("!!!\n");
    let mut ctx = Ctx::new();
    assert_eq!(config().parse(&mut seq, &mut ctx, &mut ()), Status::Fatal);
    assert_eq!(seq.rptr, 0);
}

#[test]
fn empty_input_scans_clean() {
    let mut seq = Sequencer::new("");
    let mut ctx = Ctx::new();
    assert_eq!(config().parse(&mut seq, &mut ctx, &mut ()), Status::Match);
    assert!(ctx.table.collect().children.is_empty());
}
