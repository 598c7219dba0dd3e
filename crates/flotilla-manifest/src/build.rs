// SPDX-License-Identifier: Apache-2.0

use crate::path::{sanitize_path, PathRejection};
use flotilla_model::{ContentLocator, TreeNode};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SkippedPath {
    pub path: String,
    pub reason: PathRejection,
}

/// Builds the directory tree for a flat manifest, dropping entries that fail
/// traversal checks. Input order matters: the first occurrence of a path
/// wins and later duplicates are ignored.
#[must_use]
pub fn build_tree<I>(entries: I) -> TreeNode
where
    I: IntoIterator<Item = (String, ContentLocator)>,
{
    build_tree_report(entries).0
}

/// Same as [`build_tree`], also returning the skipped paths with their
/// rejection codes so callers can surface manifest quality.
#[must_use]
pub fn build_tree_report<I>(entries: I) -> (TreeNode, Vec<SkippedPath>)
where
    I: IntoIterator<Item = (String, ContentLocator)>,
{
    let mut root = TreeNode::root();
    let mut skipped = Vec::new();
    let mut inserted = 0usize;
    for (path, locator) in entries {
        match sanitize_path(&path) {
            Ok(segments) => {
                if insert_entry(&mut root, &path, &segments, locator) {
                    inserted += 1;
                }
            }
            Err(reason) => {
                warn!(path = %path, reason = reason.as_str(), "manifest path skipped");
                skipped.push(SkippedPath { path, reason });
            }
        }
    }
    sort_children(&mut root);
    debug!("tree built: {inserted} inserted, {} skipped", skipped.len());
    (root, skipped)
}

/// Returns whether the entry produced a new file node; duplicates and kind
/// clashes are dropped in favor of the earlier occupant.
fn insert_entry(
    node: &mut TreeNode,
    full_path: &str,
    segments: &[&str],
    locator: ContentLocator,
) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return false;
    };
    let child_path = if node.path.is_empty() {
        (*head).to_string()
    } else {
        format!("{}/{head}", node.path)
    };
    let Some(children) = node.children.as_mut() else {
        return false;
    };
    let position = children.iter().position(|child| child.name == *head);
    if rest.is_empty() {
        return match position {
            Some(index) if children[index].is_folder() => {
                warn!(path = %full_path, "manifest file path conflicts with existing folder");
                false
            }
            Some(_) => {
                warn!(path = %full_path, "duplicate manifest path kept first");
                false
            }
            None => {
                children.push(TreeNode::file(head, &child_path, locator));
                true
            }
        };
    }
    let index = match position {
        Some(index) => {
            if !children[index].is_folder() {
                warn!(path = %full_path, segment = *head, "manifest folder path conflicts with existing file");
                return false;
            }
            index
        }
        None => {
            children.push(TreeNode::folder(head, &child_path));
            children.len() - 1
        }
    };
    insert_entry(&mut children[index], full_path, rest, locator)
}

/// Folders before files, both groups case-insensitive by name. The raw name
/// breaks ties so equal-ignoring-case siblings keep a fixed order.
fn sort_children(node: &mut TreeNode) {
    if let Some(children) = node.children.as_mut() {
        children.sort_by(|a, b| {
            kind_rank(a)
                .cmp(&kind_rank(b))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
        });
        for child in children {
            sort_children(child);
        }
    }
}

fn kind_rank(node: &TreeNode) -> u8 {
    if node.is_folder() {
        0
    } else {
        1
    }
}
