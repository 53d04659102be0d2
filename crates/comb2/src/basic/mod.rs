//! Primitive and logic combinators.

mod group;
mod literal;
mod logic;
mod peek;
mod proxy;
mod unicode;

pub use group::{Capture, Group, capture, group};
pub use literal::{
    Bol, Bos, ByteRange, CharSet, Eos, Literal, Null, OneOf, Pattern, lit, one_of, range,
};
pub use logic::{
    And, LimitedRepeat, MustMatch, Optional, Or, Repeat, and_, limited_repeat, must_match,
    optional, optional_repeat, or_, repeat,
};
pub use peek::{Not, Peek, not_, peek};
pub use proxy::{Proxy, proxy, proxy_with};
pub use unicode::{
    Uany, UnicodeLiteral, UnicodeOneOf, UnicodeRange, UnicodeSeq, UtfError, decode_next, ulit,
    uone_of, urange,
};
