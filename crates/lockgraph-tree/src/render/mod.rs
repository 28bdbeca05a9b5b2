//! Text rendering of a logical tree

use std::collections::HashSet;

use crate::node::Node;

/// Marker appended to a node whose dependencies were already printed
const REPEAT_MARKER: &str = " (*)";

/// Render `root` and its dependencies as an indented tree.
///
/// Shared and cyclic nodes are expanded the first time they are printed;
/// later occurrences get a ` (*)` suffix and no children.
pub fn render_tree(root: &Node) -> String {
    let mut output = String::new();
    let mut visited = HashSet::new();

    let label = if root.name().is_empty() {
        ".".to_string()
    } else {
        root.to_string()
    };
    output.push_str(&format!("{label}\n"));
    visited.insert(root.clone());

    let deps = root.dependencies();
    let count = deps.len();
    for (i, child) in deps.iter().enumerate() {
        render_subtree(&mut output, child, "", i == count - 1, &mut visited);
    }

    output
}

fn render_subtree(output: &mut String, node: &Node, prefix: &str, is_last: bool, visited: &mut HashSet<Node>) {
    let connector = if is_last { "└── " } else { "├── " };

    if !visited.insert(node.clone()) {
        output.push_str(&format!("{prefix}{connector}{node}{REPEAT_MARKER}\n"));
        return;
    }
    output.push_str(&format!("{prefix}{connector}{node}\n"));

    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    let deps = node.dependencies();
    let count = deps.len();
    for (i, child) in deps.iter().enumerate() {
        render_subtree(output, child, &child_prefix, i == count - 1, visited);
    }
}
