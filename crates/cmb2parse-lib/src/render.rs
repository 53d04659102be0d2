//! Tree rendering: indented text and JSON.
//!
//! Both renderers collapse groups of rules listed in `omit_one!` when the
//! collected group has exactly one child, making such wrappers invisible
//! in the output.

use comb2::tree::{GroupNode, Node};
use serde_json::{Value, json};

use crate::meta::description::Description;

const ROOT_TAG: &str = "<root>";

fn omitted<'n>(desc: &Description, node: &'n Node<String>) -> Option<&'n Node<String>> {
    let group = node.as_group()?;
    let tag = group.tag.as_deref()?;
    if desc.omit_if_one.contains(tag) && group.children.len() == 1 {
        Some(&group.children[0])
    } else {
        None
    }
}

/// Renders the collected tree as an indented text outline. One indent
/// unit is two spaces; token leaves contribute a `token:` line.
pub fn render_text(desc: &Description, root: &GroupNode<String>) -> String {
    let mut out = String::new();
    write_text(desc, &Node::Group(root.clone()), 0, &mut out);
    out
}

fn write_text(desc: &Description, node: &Node<String>, depth: usize, out: &mut String) {
    if let Some(only_child) = omitted(desc, node) {
        write_text(desc, only_child, depth, out);
        return;
    }
    let pad = "  ".repeat(depth);
    match node {
        Node::Group(group) => {
            out.push_str(&pad);
            out.push_str(group.tag.as_deref().unwrap_or(ROOT_TAG));
            out.push('\n');
            for child in &group.children {
                write_text(desc, child, depth + 1, out);
            }
        }
        Node::Token(token) => {
            out.push_str(&pad);
            out.push_str(&token.tag);
            out.push('\n');
            out.push_str(&pad);
            out.push_str("  token: ");
            out.push_str(&token.text);
            out.push('\n');
        }
    }
}

/// Renders the collected tree as a JSON value: groups carry `children`,
/// leaves carry `token`, the root's tag is `"<root>"`.
pub fn render_json(desc: &Description, root: &GroupNode<String>) -> Value {
    json_node(desc, &Node::Group(root.clone()))
}

/// `render_json`, pretty-printed.
pub fn render_json_string(desc: &Description, root: &GroupNode<String>) -> String {
    serde_json::to_string_pretty(&render_json(desc, root))
        .expect("a JSON value always serializes")
}

fn json_node(desc: &Description, node: &Node<String>) -> Value {
    if let Some(only_child) = omitted(desc, node) {
        return json_node(desc, only_child);
    }
    match node {
        Node::Group(group) => {
            let children: Vec<Value> = group
                .children
                .iter()
                .map(|child| json_node(desc, child))
                .collect();
            json!({
                "tag": group.tag.as_deref().unwrap_or(ROOT_TAG),
                "children": children,
            })
        }
        Node::Token(token) => json!({
            "tag": token.tag,
            "token": token.text,
        }),
    }
}
