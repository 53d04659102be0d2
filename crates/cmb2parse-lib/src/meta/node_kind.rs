//! Meta-AST node kinds.

use std::fmt;

/// Tag of a node in the parsed grammar tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Ident,
    Definition,
    Literal,
    Group,
    Token,
    Primary,
    Sequence,
    OrderedChoice,
    Range,
    RangeGroup,
    TokenDefinition,
    GroupDefinition,
    RootDefinition,
    OmitIfOneDefinition,
    AutoDefinition,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Ident => "ident",
            NodeKind::Definition => "definition",
            NodeKind::Literal => "literal",
            NodeKind::Group => "group",
            NodeKind::Token => "token",
            NodeKind::Primary => "primary",
            NodeKind::Sequence => "sequence",
            NodeKind::OrderedChoice => "ordered_choice",
            NodeKind::Range => "range",
            NodeKind::RangeGroup => "range_group",
            NodeKind::TokenDefinition => "token_definition",
            NodeKind::GroupDefinition => "group_definition",
            NodeKind::RootDefinition => "root_definition",
            NodeKind::OmitIfOneDefinition => "omit_if_one_definition",
            NodeKind::AutoDefinition => "auto_definition",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
