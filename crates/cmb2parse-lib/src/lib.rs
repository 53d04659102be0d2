//! cmb2parse: a grammar-driven parser front end.
//!
//! A PEG-like meta-grammar is parsed by the comb2 engine itself, validated
//! into a [`Description`], and lowered into a table of type-erased
//! combinators. The compiled [`Grammar`] parses inputs into a tagged tree
//! that renders as indented text or JSON.
//!
//! # Example
//!
//! ```
//! let mut grammar = cmb2parse_lib::load_grammar(
//!     "root! expr\nexpr = [0-9]+\ntoken! expr\n",
//! )
//! .expect("valid grammar");
//! let tree = grammar.parse("42").expect("valid input");
//! let text = cmb2parse_lib::render_text(grammar.description(), &tree);
//! assert_eq!(text, "<root>\n  expr\n    token: 42\n");
//! ```

pub mod compile;
pub mod driver;
mod error;
pub mod escape;
pub mod meta;
pub mod render;

pub use compile::{CompileError, CompileErrorKind, Grammar};
pub use driver::{CallStack, RecursionKind};
pub use error::{GrammarError, MetaError, ParseError};
pub use meta::description::{Description, DescriptionError};
pub use meta::{NodeKind, parse_grammar};
pub use render::{render_json, render_json_string, render_text};

/// Parses, validates and compiles a grammar source in one step.
pub fn load_grammar(source: &str) -> Result<Grammar, GrammarError> {
    let tree = meta::parse_grammar(source)?;
    let desc = Description::from_tree(&tree)?;
    Ok(Grammar::compile(desc)?)
}
