// SPDX-License-Identifier: Apache-2.0

use flotilla_model::TreeNode;
use std::collections::HashSet;

/// One visible row of a flattened tree: the node plus its indent level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FlatNode<'a> {
    pub node: &'a TreeNode,
    pub level: usize,
}

/// Depth-first pre-order rows for a virtualized list. A folder's children
/// appear right after it at `level + 1` only when its path is in `expanded`;
/// collapsed folders are not descended into. The whole sequence is
/// materialized because the rendering layer needs it synchronously.
#[must_use]
pub fn flatten_tree<'a>(nodes: &'a [TreeNode], expanded: &HashSet<String>) -> Vec<FlatNode<'a>> {
    let mut rows = Vec::new();
    push_visible(nodes, expanded, 0, &mut rows);
    rows
}

fn push_visible<'a>(
    nodes: &'a [TreeNode],
    expanded: &HashSet<String>,
    level: usize,
    rows: &mut Vec<FlatNode<'a>>,
) {
    for node in nodes {
        rows.push(FlatNode { node, level });
        if node.is_folder() && expanded.contains(&node.path) {
            if let Some(children) = &node.children {
                push_visible(children, expanded, level + 1, rows);
            }
        }
    }
}
