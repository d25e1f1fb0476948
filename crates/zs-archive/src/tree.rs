//! Hierarchical view over a flat entry list.
//!
//! Nodes are first placed in an arena and linked to their parent by path
//! lookup, then materialized into owned [`TreeNode`]s. Only directory
//! entries are eligible as parents, so a file and a directory sharing a
//! path never collide.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::warn;

use crate::path::{self, ArchivePath};
use crate::store::ArchiveEntry;

/// A node of the derived archive tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub path: ArchivePath,
    pub is_directory: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(entry: &ArchiveEntry) -> Self {
        Self {
            name: entry.name().to_string(),
            path: entry.path.clone(),
            is_directory: entry.is_directory,
            children: Vec::new(),
        }
    }

    /// Depth-first search for `path`.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path.as_str() == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// Directories first, then case-sensitive name order.
pub fn sibling_order(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_directory
        .cmp(&a.is_directory)
        .then_with(|| a.name.cmp(&b.name))
}

/// Build the ordered root list from `entries`.
///
/// Entries whose parent directory is absent are promoted to roots.
pub fn build(entries: &[ArchiveEntry]) -> Vec<TreeNode> {
    let mut dir_index: HashMap<&str, usize> = HashMap::new();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.is_directory {
            dir_index.entry(entry.path.as_str()).or_insert(idx);
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    let mut roots = Vec::new();

    for (idx, entry) in entries.iter().enumerate() {
        let parent_path = path::parent(entry.path.as_str());
        match parent_path.and_then(|p| dir_index.get(p).copied()) {
            Some(p) => children[p].push(idx),
            None => {
                if parent_path.is_some() {
                    warn!(path = %entry.path, "Orphan entry promoted to tree root");
                }
                roots.push(idx);
            }
        }
    }

    materialize(&roots, entries, &children)
}

fn materialize(
    indices: &[usize],
    entries: &[ArchiveEntry],
    children: &[Vec<usize>],
) -> Vec<TreeNode> {
    let mut nodes: Vec<TreeNode> = indices
        .iter()
        .map(|&idx| {
            let mut node = TreeNode::leaf(&entries[idx]);
            node.children = materialize(&children[idx], entries, children);
            node
        })
        .collect();
    nodes.sort_by(sibling_order);
    nodes
}
