//! Human-readable rendering of trees and entry listings.

use zs_archive::{ArchiveEntry, TreeNode};

/// Render the tree with box-drawing connectors; directories end in `/`.
pub fn render_tree(roots: &[TreeNode]) -> String {
    let mut out = String::new();
    for root in roots {
        out.push_str(&display_name(root));
        out.push('\n');
        render_children(&root.children, "", &mut out);
    }
    out
}

fn render_children(nodes: &[TreeNode], prefix: &str, out: &mut String) {
    for (idx, node) in nodes.iter().enumerate() {
        let last = idx + 1 == nodes.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&display_name(node));
        out.push('\n');
        render_children(&node.children, &format!("{prefix}{indent}"), out);
    }
}

fn display_name(node: &TreeNode) -> String {
    if node.is_directory {
        format!("{}/", node.name)
    } else {
        node.name.clone()
    }
}

/// One path per line; directories end in `/`.
pub fn render_entries(entries: &[ArchiveEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            if e.is_directory {
                format!("{}\n", e.path.to_dir_name())
            } else {
                format!("{}\n", e.path)
            }
        })
        .collect()
}
