//! Directive analysis: meta-AST → validated grammar description.

use indexmap::{IndexMap, IndexSet};

use comb2::tree::{GroupNode, Node};

use super::node_kind::NodeKind;

/// A validated grammar: rule bodies plus the directive sets that steer
/// compilation and rendering. Declaration order is preserved throughout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    /// Rule name → body AST (an `OrderedChoice` group).
    pub definitions: IndexMap<String, Node<NodeKind>>,
    /// The single entry-point rule.
    pub root_name: String,
    /// Rules whose match is captured as one scalar token.
    pub tokens: IndexSet<String>,
    /// Rules declared as structural groups; the eligibility domain for
    /// `omit_one!`.
    pub groups: IndexSet<String>,
    /// Groups that collapse to their only child when rendered.
    pub omit_if_one: IndexSet<String>,
    /// Rules invoked implicitly after every successful match outside token
    /// scopes.
    pub auto_rules: IndexSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptionError {
    #[error("duplicate definition for rule: {0}")]
    DuplicateDefinition(String),
    #[error("duplicate {directive} definition for rule: {name}")]
    DuplicateDirective { directive: &'static str, name: String },
    #[error("token definition conflicts with group definition for rule: {0}")]
    TokenGroupConflict(String),
    #[error("{directive} definition refers to undefined rule: {name}")]
    UndefinedReference { directive: &'static str, name: String },
    #[error("omit_one definition refers to undefined group rule: {0}")]
    OmitNotGroup(String),
    #[error("multiple root definitions")]
    MultipleRoots,
    #[error("no root definition")]
    MissingRoot,
    #[error("root definition does not have exactly one child")]
    MalformedRoot,
    #[error("malformed grammar tree: {0}")]
    Malformed(&'static str),
}

fn directive_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::TokenDefinition => "token",
        NodeKind::GroupDefinition => "group",
        NodeKind::RootDefinition => "root",
        NodeKind::OmitIfOneDefinition => "omit_one",
        NodeKind::AutoDefinition => "auto",
        _ => "definition",
    }
}

impl Description {
    /// Walks the collected meta-AST and performs every structural
    /// validation; never yields a partially filled description.
    pub fn from_tree(root: &GroupNode<NodeKind>) -> Result<Self, DescriptionError> {
        let mut definitions: IndexMap<String, Node<NodeKind>> = IndexMap::new();
        let mut tokens: IndexSet<String> = IndexSet::new();
        let mut groups: IndexSet<String> = IndexSet::new();
        let mut omit_if_one: IndexSet<String> = IndexSet::new();
        let mut auto_rules: IndexSet<String> = IndexSet::new();
        let mut root_name = String::new();

        for child in &root.children {
            let group = child
                .as_group()
                .ok_or(DescriptionError::Malformed("top-level node is not a group"))?;
            match group.tag {
                Some(NodeKind::Definition) => {
                    if group.children.len() != 2 {
                        return Err(DescriptionError::Malformed(
                            "definition does not have exactly two children",
                        ));
                    }
                    let name = ident_text(&group.children[0])?;
                    let body = &group.children[1];
                    if body
                        .as_group()
                        .is_none_or(|g| g.tag != Some(NodeKind::OrderedChoice))
                    {
                        return Err(DescriptionError::Malformed(
                            "definition body is not an ordered choice",
                        ));
                    }
                    if definitions.contains_key(name) {
                        return Err(DescriptionError::DuplicateDefinition(name.to_string()));
                    }
                    definitions.insert(name.to_string(), body.clone());
                }
                Some(
                    kind @ (NodeKind::TokenDefinition
                    | NodeKind::GroupDefinition
                    | NodeKind::RootDefinition
                    | NodeKind::OmitIfOneDefinition
                    | NodeKind::AutoDefinition),
                ) => {
                    if kind == NodeKind::RootDefinition && group.children.len() != 1 {
                        return Err(DescriptionError::MalformedRoot);
                    }
                    for entry in &group.children {
                        let name = ident_text(entry)?;
                        match kind {
                            NodeKind::RootDefinition => {
                                if !root_name.is_empty() {
                                    return Err(DescriptionError::MultipleRoots);
                                }
                                root_name = name.to_string();
                            }
                            NodeKind::TokenDefinition => {
                                if groups.contains(name) {
                                    return Err(DescriptionError::TokenGroupConflict(
                                        name.to_string(),
                                    ));
                                }
                                if !tokens.insert(name.to_string()) {
                                    return Err(DescriptionError::DuplicateDirective {
                                        directive: "token",
                                        name: name.to_string(),
                                    });
                                }
                            }
                            NodeKind::GroupDefinition => {
                                if tokens.contains(name) {
                                    return Err(DescriptionError::TokenGroupConflict(
                                        name.to_string(),
                                    ));
                                }
                                if !groups.insert(name.to_string()) {
                                    return Err(DescriptionError::DuplicateDirective {
                                        directive: "group",
                                        name: name.to_string(),
                                    });
                                }
                            }
                            NodeKind::OmitIfOneDefinition => {
                                if !omit_if_one.insert(name.to_string()) {
                                    return Err(DescriptionError::DuplicateDirective {
                                        directive: "omit_one",
                                        name: name.to_string(),
                                    });
                                }
                            }
                            NodeKind::AutoDefinition => {
                                if !auto_rules.insert(name.to_string()) {
                                    return Err(DescriptionError::DuplicateDirective {
                                        directive: "auto",
                                        name: name.to_string(),
                                    });
                                }
                            }
                            _ => unreachable!(),
                        }
                    }
                }
                _ => {
                    return Err(DescriptionError::Malformed(
                        "unsupported node kind at grammar top level",
                    ));
                }
            }
        }

        for name in &tokens {
            if !definitions.contains_key(name) {
                return Err(DescriptionError::UndefinedReference {
                    directive: "token",
                    name: name.clone(),
                });
            }
        }
        for name in &groups {
            if !definitions.contains_key(name) {
                return Err(DescriptionError::UndefinedReference {
                    directive: "group",
                    name: name.clone(),
                });
            }
        }
        for name in &omit_if_one {
            if !groups.contains(name) {
                return Err(DescriptionError::OmitNotGroup(name.clone()));
            }
        }
        for name in &auto_rules {
            if !definitions.contains_key(name) {
                return Err(DescriptionError::UndefinedReference {
                    directive: "auto",
                    name: name.clone(),
                });
            }
        }
        if root_name.is_empty() {
            return Err(DescriptionError::MissingRoot);
        }
        if !definitions.contains_key(&root_name) {
            return Err(DescriptionError::UndefinedReference {
                directive: "root",
                name: root_name,
            });
        }

        Ok(Description {
            definitions,
            root_name,
            tokens,
            groups,
            omit_if_one,
            auto_rules,
        })
    }
}

fn ident_text(node: &Node<NodeKind>) -> Result<&str, DescriptionError> {
    node.as_token()
        .filter(|t| t.tag == NodeKind::Ident)
        .map(|t| t.text.as_str())
        .ok_or(DescriptionError::Malformed("expected an identifier leaf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::parse_grammar;

    fn describe(source: &str) -> Result<Description, DescriptionError> {
        let tree = parse_grammar(source).expect("grammar parses");
        Description::from_tree(&tree)
    }

    #[test]
    fn collects_rules_and_directives() {
        let desc = describe(
            "expr = term\nterm = [0-9]+\nroot! expr\ntoken! term\ngroup! expr\nomit_one! expr\nauto! term\n",
        )
        .expect("valid description");
        assert_eq!(desc.root_name, "expr");
        assert_eq!(
            desc.definitions.keys().collect::<Vec<_>>(),
            vec!["expr", "term"]
        );
        assert!(desc.tokens.contains("term"));
        assert!(desc.groups.contains("expr"));
        assert!(desc.omit_if_one.contains("expr"));
        assert!(desc.auto_rules.contains("term"));
    }

    #[test]
    fn duplicate_definition_is_rejected() {
        assert_eq!(
            describe("a = 'x'\na = 'y'\nroot! a\n"),
            Err(DescriptionError::DuplicateDefinition("a".into()))
        );
    }

    #[test]
    fn token_group_conflict_is_rejected() {
        assert_eq!(
            describe("a = 'x'\nroot! a\ntoken! a\ngroup! a\n"),
            Err(DescriptionError::TokenGroupConflict("a".into()))
        );
        assert_eq!(
            describe("a = 'x'\nroot! a\ngroup! a\ntoken! a\n"),
            Err(DescriptionError::TokenGroupConflict("a".into()))
        );
    }

    #[test]
    fn directives_must_refer_to_rules() {
        assert_eq!(
            describe("a = 'x'\nroot! a\ntoken! b\n"),
            Err(DescriptionError::UndefinedReference {
                directive: "token",
                name: "b".into()
            })
        );
        assert_eq!(
            describe("a = 'x'\nroot! b\n"),
            Err(DescriptionError::UndefinedReference {
                directive: "root",
                name: "b".into()
            })
        );
    }

    #[test]
    fn omit_one_requires_group() {
        assert_eq!(
            describe("a = 'x'\nroot! a\nomit_one! a\n"),
            Err(DescriptionError::OmitNotGroup("a".into()))
        );
    }

    #[test]
    fn root_is_mandatory_and_unique() {
        assert_eq!(describe("a = 'x'\n"), Err(DescriptionError::MissingRoot));
        assert_eq!(
            describe("a = 'x'\nroot! a\nroot! a\n"),
            Err(DescriptionError::MultipleRoots)
        );
    }
}
