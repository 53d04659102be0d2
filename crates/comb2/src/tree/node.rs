//! The collected, user-visible tree.

use crate::pos::Pos;

use super::branch_table::{BranchTable, Elem};

/// A node of the collected tree: a tagged group or a token leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<T> {
    Group(GroupNode<T>),
    Token(TokenNode<T>),
}

/// A structural node. The root carries no tag.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode<T> {
    pub tag: Option<T>,
    pub pos: Pos,
    pub children: Vec<Node<T>>,
}

/// A leaf carrying the captured substring.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenNode<T> {
    pub tag: T,
    pub text: String,
    pub pos: Pos,
}

impl<T> Node<T> {
    pub fn as_group(&self) -> Option<&GroupNode<T>> {
        match self {
            Node::Group(g) => Some(g),
            Node::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&TokenNode<T>> {
        match self {
            Node::Token(t) => Some(t),
            Node::Group(_) => None,
        }
    }
}

/// Event stream of a flattened traversal: groups and tokens only,
/// anonymous branches are transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisitEvent<'a, T> {
    EnterGroup(&'a T, Pos),
    LeaveGroup(&'a T, Pos),
    Token(&'a T, &'a str, Pos),
}

impl<T: Clone> BranchTable<T> {
    /// Walks the committed tree, skipping anonymous branches.
    pub fn visit_nodes<F>(&self, f: &mut F)
    where
        F: FnMut(VisitEvent<'_, T>),
    {
        self.visit_nodes_at(self.root(), f);
    }

    fn visit_nodes_at<F>(&self, id: usize, f: &mut F)
    where
        F: FnMut(VisitEvent<'_, T>),
    {
        match &self.nodes[id] {
            Elem::Branch { children } => {
                for &child in children {
                    self.visit_nodes_at(child, f);
                }
            }
            Elem::Group { tag, pos, children } => {
                f(VisitEvent::EnterGroup(tag, *pos));
                for &child in children {
                    self.visit_nodes_at(child, f);
                }
                f(VisitEvent::LeaveGroup(tag, *pos));
            }
            Elem::Ident { tag, text, pos } => f(VisitEvent::Token(tag, text, *pos)),
        }
    }
}

impl<T: Clone> BranchTable<T> {
    /// Post-order collection of the committed tree. Anonymous branches are
    /// flattened away; idents become tokens, groups become group nodes.
    pub fn collect(&self) -> GroupNode<T> {
        let mut root = GroupNode {
            tag: None,
            pos: Pos::NONE,
            children: Vec::new(),
        };
        self.collect_into(self.root(), &mut root.children);
        root
    }

    fn collect_into(&self, id: usize, out: &mut Vec<Node<T>>) {
        match &self.nodes[id] {
            Elem::Branch { children } => {
                for &child in children {
                    self.collect_into(child, out);
                }
            }
            Elem::Group { tag, pos, children } => {
                let mut group = GroupNode {
                    tag: Some(tag.clone()),
                    pos: *pos,
                    children: Vec::new(),
                };
                for &child in children {
                    self.collect_into(child, &mut group.children);
                }
                out.push(Node::Group(group));
            }
            Elem::Ident { tag, text, pos } => {
                out.push(Node::Token(TokenNode {
                    tag: tag.clone(),
                    text: text.clone(),
                    pos: *pos,
                }));
            }
        }
    }
}
