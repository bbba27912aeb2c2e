//! Canonical path handling and the read-only tree walk.

use super::node::{Node, NodeKind};

/// Normalizes a caller-supplied key into a canonical absolute path: a
/// leading `/` is added if missing, redundant separators collapse, `.` is
/// dropped, and `..` pops a segment without ever climbing above the root.
pub fn canonicalize(key: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in key.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// The non-empty segments of a canonical path, root first.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Splits a canonical path into its parent path and final segment.
/// `None` for the root, which has neither.
pub fn split_last(path: &str) -> Option<(&str, &str)> {
    let (parent, name) = path.rsplit_once('/')?;
    if name.is_empty() {
        return None;
    }
    let parent = if parent.is_empty() { "/" } else { parent };
    Some((parent, name))
}

/// Outcome of walking a canonical path down from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The full path resolved.
    Found(&'a Node),
    /// A segment was absent; `deepest` is the deepest existing ancestor
    /// directory along the path.
    Missing { deepest: &'a Node },
    /// A leaf occupies an intermediate segment: a type mismatch, not mere
    /// absence.
    Blocked { leaf: &'a Node },
}

/// Walks `path` from `root`, consuming one segment at a time. Read-only.
pub fn lookup<'a>(root: &'a Node, path: &str) -> Lookup<'a> {
    let mut current = root;
    for segment in segments(path) {
        match current.kind() {
            NodeKind::Directory { children } => match children.get(segment) {
                Some(child) => current = child,
                None => return Lookup::Missing { deepest: current },
            },
            NodeKind::File { .. } => return Lookup::Blocked { leaf: current },
        }
    }
    Lookup::Found(current)
}
