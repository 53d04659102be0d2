//! String-literal scanners.
//!
//! `make_string` builds a quoted scanner from an open quote, an
//! end-condition and an inner rule. The strong variant cuts on the closing
//! quote (an unterminated literal is fatal), the weak variant backtracks,
//! and the partial variant accepts a literal cut short by end of line or
//! input.

use crate::basic::{
    Eos, Uany, and_, lit, must_match, not_, optional, or_, peek, proxy, repeat,
};
use crate::combinator::{Combinator, Shape};
use crate::composite::number::{hexadecimal_number, octal_number};
use crate::composite::range::eol;
use crate::context::Context;
use crate::sequencer::Sequencer;
use crate::status::Status;

fn hex2<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(hexadecimal_number(), hexadecimal_number())
}

fn hex4<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(hex2(), hex2())
}

fn oct3<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(and_(octal_number(), octal_number()), octal_number())
}

fn hex_str<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(lit(b'x'), hex2())
}

fn utf16_str<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(lit(b'u'), hex4())
}

fn utf32_str<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(lit(b'U'), and_(hex4(), hex4()))
}

fn make_strlit<C: Context, R>(
    after_bs: impl Combinator<C, R> + Shape + Clone,
    normal: impl Combinator<C, R> + Shape + Clone,
) -> impl Combinator<C, R> + Shape + Clone {
    or_(
        and_(
            lit(b'\\'),
            must_match(or_(
                or_(or_(hex_str(), oct3()), or_(utf16_str(), utf32_str())),
                after_bs,
            )),
        ),
        normal,
    )
}

/// One element of a C-style string: an escape sequence or a plain scalar.
/// A backslash commits: a malformed escape is fatal.
pub fn strlit<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    make_strlit(or_(eol(), Uany), Uany)
}

pub fn make_string<C: Context, R>(
    quote: impl Combinator<C, R> + Shape + Clone,
    end_cond: impl Combinator<C, R> + Shape + Clone,
    inner: impl Combinator<C, R> + Shape + Clone,
) -> impl Combinator<C, R> + Shape + Clone {
    and_(
        and_(
            quote.clone(),
            optional(repeat(and_(not_(end_cond), inner))),
        ),
        must_match(quote),
    )
}

pub fn make_weak_string<C: Context, R>(
    quote: impl Combinator<C, R> + Shape + Clone,
    end_cond: impl Combinator<C, R> + Shape + Clone,
    inner: impl Combinator<C, R> + Shape + Clone,
) -> impl Combinator<C, R> + Shape + Clone {
    and_(
        and_(
            quote.clone(),
            optional(repeat(and_(not_(end_cond), inner))),
        ),
        quote,
    )
}

pub fn make_partial_string<C: Context, R>(
    quote: impl Combinator<C, R> + Shape + Clone,
    end_cond: impl Combinator<C, R> + Shape + Clone,
    inner: impl Combinator<C, R> + Shape + Clone,
) -> impl Combinator<C, R> + Shape + Clone {
    and_(
        and_(quote, optional(repeat(and_(not_(end_cond), inner)))),
        peek(or_(eol(), Eos)),
    )
}

macro_rules! string_family {
    ($name:ident, $weak:ident, $partial:ident, $quote:expr, $end:expr, $inner:expr) => {
        pub fn $name<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
            make_string($quote, $end, $inner)
        }

        pub fn $weak<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
            make_weak_string($quote, $end, $inner)
        }

        pub fn $partial<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
            make_partial_string($quote, $end, $inner)
        }
    };
}

string_family!(
    c_str,
    c_str_weak,
    c_str_partial,
    lit(b'"'),
    or_(lit(b'"'), eol()),
    strlit()
);
string_family!(
    char_str,
    char_str_weak,
    char_str_partial,
    lit(b'\''),
    or_(lit(b'\''), eol()),
    strlit()
);
string_family!(
    js_regex_str,
    js_regex_str_weak,
    js_regex_str_partial,
    lit(b'/'),
    or_(lit(b'/'), eol()),
    strlit()
);
string_family!(go_raw_str, go_raw_str_weak, go_raw_str_partial, lit(b'`'), lit(b'`'), Uany);
string_family!(
    py_doc_str_double,
    py_doc_str_double_weak,
    py_doc_str_double_partial,
    lit("\"\"\""),
    lit("\"\"\""),
    Uany
);
string_family!(
    py_doc_str_single,
    py_doc_str_single_weak,
    py_doc_str_single_partial,
    lit("'''"),
    lit("'''"),
    Uany
);

/// `R"delim( ... )delim"` body: scans to the matching close delimiter.
fn cpp_raw_inner<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    proxy(|seq: &mut Sequencer<'_>, _ctx: &mut C, _rec: &mut R| {
        let entry = seq.rptr;
        while seq.current() != Some(b'(') {
            if seq.eos() {
                seq.rptr = entry;
                return Status::NotMatch;
            }
            seq.consume();
        }
        let delim = seq.slice(crate::Pos::new(entry, seq.rptr)).to_vec();
        seq.consume();
        loop {
            if seq.eos() {
                seq.rptr = entry;
                return Status::NotMatch;
            }
            if seq.current() == Some(b')') {
                let close = seq.rptr;
                seq.consume();
                if seq.matches(&delim) {
                    seq.rptr = close + 1 + delim.len();
                    return Status::Match;
                }
                seq.rptr = close;
            }
            seq.consume();
        }
    })
}

/// C++ raw string with matched delimiter tail: `R"x(...)x"`.
pub fn cpp_raw_str<C: Context, R>() -> impl Combinator<C, R> + Shape + Clone {
    and_(
        and_(lit(b'R'), lit(b'"')),
        and_(cpp_raw_inner(), lit(b'"')),
    )
}
