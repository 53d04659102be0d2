//! Indentation matching.
//!
//! The context records the current indent width (`indent`/`set_indent`) and
//! may prescribe how much deeper a `More` indent has to be
//! (`expect_indent`). All widths are counted in spaces.

use crate::combinator::{Combinator, Shape};
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentMode {
    /// Strictly shallower than the recorded width.
    Less,
    /// Exactly the recorded width.
    Equal,
    /// At most the recorded width.
    LessEqual,
    /// Strictly deeper than the recorded width.
    More,
    /// The recorded width or deeper.
    MoreEqual,
}

#[derive(Debug, Clone, Copy)]
pub struct Indent {
    mode: IndentMode,
}

pub fn make_indent(mode: IndentMode) -> Indent {
    Indent { mode }
}

pub fn indent() -> Indent {
    make_indent(IndentMode::Equal)
}

pub fn new_indent() -> Indent {
    make_indent(IndentMode::More)
}

pub fn new_or_eq_indent() -> Indent {
    make_indent(IndentMode::MoreEqual)
}

pub fn less_indent() -> Indent {
    make_indent(IndentMode::Less)
}

pub fn less_eq_indent() -> Indent {
    make_indent(IndentMode::LessEqual)
}

impl Shape for Indent {}

impl<C: Context, R> Combinator<C, R> for Indent {
    fn parse(&self, seq: &mut Sequencer<'_>, ctx: &mut C, _rec: &mut R) -> Status {
        use IndentMode::*;
        let entry = seq.rptr;
        let recorded = ctx.indent();
        let mut width = 0usize;
        while width < recorded {
            if seq.current() != Some(b' ') {
                if self.mode == Less || self.mode == LessEqual {
                    ctx.set_indent(width);
                    return Status::Match;
                }
                seq.rptr = entry;
                return Status::NotMatch;
            }
            seq.consume();
            width += 1;
        }
        if self.mode == Less {
            seq.rptr = entry;
            return Status::NotMatch;
        }
        if self.mode == More || self.mode == MoreEqual {
            if self.mode == More && seq.current() != Some(b' ') {
                seq.rptr = entry;
                return Status::NotMatch;
            }
            match ctx.expect_indent() {
                Some(expect) => {
                    let from = width;
                    while seq.current() == Some(b' ') && width - from < expect {
                        seq.consume();
                        width += 1;
                    }
                    if width - from != expect {
                        seq.rptr = entry;
                        return Status::NotMatch;
                    }
                }
                None => {
                    // no prescribed depth: take everything that is there
                    while seq.current() == Some(b' ') {
                        seq.consume();
                        width += 1;
                    }
                }
            }
        }
        ctx.set_indent(width);
        Status::Match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IndentCtx {
        width: usize,
        expect: Option<usize>,
    }

    impl Context for IndentCtx {
        type Tag = &'static str;

        fn expect_indent(&self) -> Option<usize> {
            self.expect
        }

        fn indent(&self) -> usize {
            self.width
        }

        fn set_indent(&mut self, width: usize) {
            self.width = width;
        }
    }

    fn run(mode: IndentMode, input: &str, width: usize, expect: Option<usize>) -> (Status, usize) {
        let mut seq = Sequencer::new(input);
        let mut ctx = IndentCtx { width, expect };
        let status = make_indent(mode).parse(&mut seq, &mut ctx, &mut ());
        (status, ctx.width)
    }

    #[test]
    fn equal_matches_recorded_width() {
        assert_eq!(run(IndentMode::Equal, "  x", 2, None), (Status::Match, 2));
        assert_eq!(run(IndentMode::Equal, " x", 2, None).0, Status::NotMatch);
    }

    #[test]
    fn more_deepens() {
        assert_eq!(run(IndentMode::More, "    x", 2, None), (Status::Match, 4));
        assert_eq!(run(IndentMode::More, "  x", 2, None).0, Status::NotMatch);
        // prescribed extra depth must match exactly
        assert_eq!(
            run(IndentMode::More, "    x", 2, Some(2)),
            (Status::Match, 4)
        );
        assert_eq!(run(IndentMode::More, "    x", 2, Some(3)).0, Status::NotMatch);
    }

    #[test]
    fn less_shallows() {
        assert_eq!(run(IndentMode::Less, "x", 2, None), (Status::Match, 0));
        assert_eq!(run(IndentMode::Less, " x", 2, None), (Status::Match, 1));
        assert_eq!(run(IndentMode::Less, "  x", 2, None).0, Status::NotMatch);
        assert_eq!(run(IndentMode::LessEqual, "  x", 2, None), (Status::Match, 2));
    }
}
