//! Comment scanners.

use crate::basic::{Eos, Uany, and_, lit, must_match, not_, or_, proxy_with};
use crate::combinator::{Combinator, Shape};
use crate::composite::range::eol;
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::Status;

/// Scan state of [`comment`]: `begin`, then `inner` until `end` matches.
/// With `nest`, every further `begin` raises the nesting depth and `end`
/// lowers it.
#[derive(Debug, Clone)]
struct Comment<B, I, E> {
    begin: B,
    inner: I,
    end: E,
    nest: bool,
}

impl<C: Context, R, B, I, E> Combinator<C, R> for Comment<B, I, E>
where
    B: Combinator<C, R>,
    I: Combinator<C, R>,
    E: Combinator<C, R>,
{
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R) -> Status {
        let entry = seq.rptr;
        match self.begin.parse(seq, ctx, rec) {
            Status::Match => {}
            other => return other,
        }
        let mut depth = 1usize;
        while depth > 0 {
            let ptr = seq.rptr;
            match self.end.parse(seq, ctx, rec) {
                Status::Match => {
                    depth -= 1;
                    continue;
                }
                Status::Fatal => return Status::Fatal,
                Status::NotMatch => {}
            }
            seq.rptr = ptr;
            if self.nest {
                match self.begin.parse(seq, ctx, rec) {
                    Status::Match => {
                        depth += 1;
                        continue;
                    }
                    Status::Fatal => return Status::Fatal,
                    Status::NotMatch => {}
                }
                seq.rptr = ptr;
            }
            match self.inner.parse(seq, ctx, rec) {
                Status::Match => {}
                Status::Fatal => return Status::Fatal,
                Status::NotMatch => {
                    seq.rptr = entry;
                    return Status::NotMatch;
                }
            }
        }
        Status::Match
    }
}

/// Builds a comment scanner. `on_fail` supplies the cut diagnostic: it is
/// invoked when the comment fails to match under a `must_match`.
pub fn comment<C, R, B, I, E, H>(
    begin: B,
    inner: I,
    end: E,
    nest: bool,
    on_fail: H,
) -> impl Combinator<C, R> + Shape + Clone
where
    C: Context,
    B: Combinator<C, R> + Clone,
    I: Combinator<C, R> + Clone,
    E: Combinator<C, R> + Clone,
    H: Fn(&mut Sequencer<'_>, &mut C, &mut R) + Clone,
{
    let scan = Comment {
        begin,
        inner,
        end,
        nest,
    };
    proxy_with(
        move |seq: &mut Sequencer<'_>, ctx: &mut C, rec: &mut R| scan.parse(seq, ctx, rec),
        on_fail,
    )
}

/// End condition of a block comment: reaching end of input first is fatal.
fn block_end<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(must_match(not_(Eos)), lit("*/"))
}

fn line_end<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    or_(eol(), Eos)
}

pub fn c_comment<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    comment(
        lit("/*"),
        Uany,
        block_end(),
        false,
        |seq: &mut Sequencer<'_>, ctx: &mut C, _rec: &mut R| {
            ctx.report_error(
                seq,
                format_args!("unexpected EOF while parsing comment. expect */"),
            );
        },
    )
}

pub fn nested_c_comment<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    comment(
        lit("/*"),
        Uany,
        block_end(),
        true,
        |seq: &mut Sequencer<'_>, ctx: &mut C, _rec: &mut R| {
            ctx.report_error(
                seq,
                format_args!("unexpected EOF while parsing comment. expect */"),
            );
        },
    )
}

pub fn shell_comment<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    comment(
        lit(b'#'),
        Uany,
        line_end(),
        false,
        |seq: &mut Sequencer<'_>, ctx: &mut C, _rec: &mut R| {
            ctx.report_error(seq, format_args!("unexpected error"));
        },
    )
}

pub fn cpp_comment<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    comment(
        lit("//"),
        Uany,
        line_end(),
        false,
        |seq: &mut Sequencer<'_>, ctx: &mut C, _rec: &mut R| {
            ctx.report_error(seq, format_args!("unexpected error"));
        },
    )
}

pub fn asm_comment<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    comment(
        lit(b';'),
        Uany,
        line_end(),
        false,
        |seq: &mut Sequencer<'_>, ctx: &mut C, _rec: &mut R| {
            ctx.report_error(seq, format_args!("unexpected error"));
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::must_match;
    use crate::context::{LexContext, NullContext};

    fn run(c: &impl Combinator<NullContext, ()>, input: &str) -> Status {
        let mut seq = Sequencer::new(input);
        c.parse(&mut seq, &mut NullContext::new(), &mut ())
    }

    #[test]
    fn comment_shapes() {
        assert_eq!(run(&shell_comment(), "# abstract\n"), Status::Match);
        assert_eq!(run(&nested_c_comment(), "/*un/**/*expect*/"), Status::Match);
        assert_eq!(run(&c_comment(), "/*/**/"), Status::Match);
        assert_eq!(run(&cpp_comment(), "// comment"), Status::Match);
        assert_eq!(run(&asm_comment(), "; comment\n"), Status::Match);
    }

    #[test]
    fn unterminated_block_is_fatal() {
        assert_eq!(run(&c_comment(), "/*"), Status::Fatal);
        assert_eq!(run(&nested_c_comment(), "/*/*...*/"), Status::Fatal);
    }

    #[test]
    fn not_a_comment_backtracks() {
        let mut seq = Sequencer::new("/x");
        assert_eq!(
            c_comment().parse(&mut seq, &mut NullContext::<&str>::new(), &mut ()),
            Status::NotMatch
        );
        assert_eq!(seq.rptr, 0);
    }

    #[test]
    fn cut_diagnostic_names_the_expectation() {
        let mut seq = Sequencer::new("x");
        let mut ctx = LexContext::<&str>::new();
        assert_eq!(
            must_match(c_comment()).parse(&mut seq, &mut ctx, &mut ()),
            Status::Fatal
        );
        assert_eq!(
            ctx.errbuf,
            "unexpected EOF while parsing comment. expect */\n"
        );

        let mut seq = Sequencer::new("x");
        let mut ctx = LexContext::<&str>::new();
        assert_eq!(
            must_match(shell_comment()).parse(&mut seq, &mut ctx, &mut ()),
            Status::Fatal
        );
        assert_eq!(ctx.errbuf, "unexpected error\n");
    }
}
