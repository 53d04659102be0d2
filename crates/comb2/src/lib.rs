//! comb2: composable backtracking parser combinators.
//!
//! A combinator is any value implementing [`Combinator`]: it reads from a
//! [`Sequencer`], reports hooks into a [`Context`], and returns a
//! three-valued [`Status`]. `NotMatch` is recoverable (the cursor is
//! restored), `Fatal` aborts the whole parse.
//!
//! # Example
//!
//! ```
//! use comb2::basic::{capture, range, repeat};
//! use comb2::{Combinator, LexContext, Sequencer, Status};
//!
//! let digits = capture("number", repeat(range(b'0', b'9')));
//! let mut seq = Sequencer::new("123");
//! let mut ctx = LexContext::new();
//! assert_eq!(digits.parse(&mut seq, &mut ctx, &mut ()), Status::Match);
//! assert_eq!(ctx.str_tag, Some("number"));
//! ```

pub mod basic;
pub mod composite;
mod context;
mod dynamic;
mod pos;
mod sequencer;
mod status;
pub mod tree;

mod combinator;

pub use combinator::{Combinator, Shape};
pub use context::{Context, LexContext, NullContext};
pub use dynamic::DynCombinator;
pub use pos::Pos;
pub use sequencer::Sequencer;
pub use status::{CallbackKind, Status};
