use hashlink::LinkedHashMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A tree element: either a directory holding named children or a leaf
/// holding an optional value. A directory has no value slot and a leaf has
/// no children, so the typing invariants cannot be violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) key: String,
    pub(crate) kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File {
        /// `None` stays distinct from an empty string.
        value: Option<String>,
    },
    Directory {
        /// Children keyed by their single path segment, in insertion order.
        children: LinkedHashMap<String, Node>,
    },
}

impl Node {
    pub(crate) fn new_file(key: impl Into<String>, value: Option<String>) -> Self {
        Node {
            key: key.into(),
            kind: NodeKind::File { value },
        }
    }

    pub(crate) fn new_directory(key: impl Into<String>) -> Self {
        Node {
            key: key.into(),
            kind: NodeKind::Directory {
                children: LinkedHashMap::new(),
            },
        }
    }

    pub(crate) fn root() -> Self {
        Node::new_directory("/")
    }

    /// Canonical absolute path of this node.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// The leaf value. `None` for directories and for valueless leaves.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { value } => value.as_deref(),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Owned deep copy of this node for handing out of the store.
    ///
    /// Directories include their immediate children; child directories are
    /// descended into only when `recursive`, and appear with empty child
    /// lists otherwise. `sorted` orders children lexicographically instead
    /// of by insertion.
    pub(crate) fn snapshot(&self, recursive: bool, sorted: bool) -> Node {
        match &self.kind {
            NodeKind::File { value } => Node::new_file(self.key.clone(), value.clone()),
            NodeKind::Directory { children } => {
                let mut entries: Vec<(&String, &Node)> = children.iter().collect();
                if sorted {
                    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                }
                let children = entries
                    .into_iter()
                    .map(|(name, child)| {
                        let snap = if recursive {
                            child.snapshot(true, sorted)
                        } else {
                            child.shallow()
                        };
                        (name.clone(), snap)
                    })
                    .collect();
                Node {
                    key: self.key.clone(),
                    kind: NodeKind::Directory { children },
                }
            }
        }
    }

    /// Copy without descendants: leaves keep their value, directories come
    /// back with an empty child list.
    fn shallow(&self) -> Node {
        match &self.kind {
            NodeKind::File { value } => Node::new_file(self.key.clone(), value.clone()),
            NodeKind::Directory { .. } => Node::new_directory(self.key.clone()),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.kind {
            NodeKind::File { value } => {
                let mut state = serializer.serialize_struct("Node", 3)?;
                state.serialize_field("key", &self.key)?;
                state.serialize_field("dir", &false)?;
                state.serialize_field("value", value)?;
                state.end()
            }
            NodeKind::Directory { children } => {
                let mut state = serializer.serialize_struct("Node", 3)?;
                state.serialize_field("key", &self.key)?;
                state.serialize_field("dir", &true)?;
                let nodes: Vec<&Node> = children.values().collect();
                state.serialize_field("nodes", &nodes)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let mut root = Node::root();
        let NodeKind::Directory { children } = &mut root.kind else {
            unreachable!()
        };

        let mut dir = Node::new_directory("/b");
        let NodeKind::Directory {
            children: dir_children,
        } = &mut dir.kind
        else {
            unreachable!()
        };
        dir_children.insert(
            "deep".to_string(),
            Node::new_file("/b/deep", Some("buried".to_string())),
        );

        children.insert(
            "b".to_string(),
            dir,
        );
        children.insert(
            "a".to_string(),
            Node::new_file("/a", Some("first".to_string())),
        );
        root
    }

    #[test]
    fn snapshot_of_leaf_copies_the_value() {
        let leaf = Node::new_file("/a", Some("first".to_string()));
        let snap = leaf.snapshot(true, true);
        assert_eq!(snap, leaf);
        assert_eq!(snap.value(), Some("first"));
    }

    #[test]
    fn shallow_snapshot_prunes_grandchildren() {
        let snap = sample_tree().snapshot(false, false);
        let NodeKind::Directory { children } = snap.kind() else {
            panic!("expected a directory snapshot");
        };
        assert_eq!(children.len(), 2);
        // Leaf children keep their values.
        assert_eq!(children.get("a").expect("missing /a").value(), Some("first"));
        // Directory children appear, but emptied.
        let NodeKind::Directory { children: inner } =
            children.get("b").expect("missing /b").kind()
        else {
            panic!("expected /b to stay a directory");
        };
        assert!(inner.is_empty());
    }

    #[test]
    fn recursive_snapshot_keeps_the_subtree() {
        let snap = sample_tree().snapshot(true, false);
        let NodeKind::Directory { children } = snap.kind() else {
            panic!("expected a directory snapshot");
        };
        let NodeKind::Directory { children: inner } =
            children.get("b").expect("missing /b").kind()
        else {
            panic!("expected /b to stay a directory");
        };
        assert_eq!(
            inner.get("deep").expect("missing /b/deep").value(),
            Some("buried")
        );
    }

    #[test]
    fn snapshot_ordering_follows_insertion_unless_sorted() {
        let tree = sample_tree();

        let insertion_snapshot = tree.snapshot(false, false);
        let insertion: Vec<&str> = match insertion_snapshot.kind() {
            NodeKind::Directory { children } => children.keys().map(String::as_str).collect(),
            _ => panic!("expected a directory"),
        };
        assert_eq!(insertion, vec!["b", "a"]);

        let sorted_snapshot = tree.snapshot(false, true);
        let sorted: Vec<&str> = match sorted_snapshot.kind() {
            NodeKind::Directory { children } => children.keys().map(String::as_str).collect(),
            _ => panic!("expected a directory"),
        };
        assert_eq!(sorted, vec!["a", "b"]);
    }

    #[test]
    fn leaf_serializes_flat() {
        let leaf = Node::new_file("/a", Some("first".to_string()));
        assert_eq!(
            serde_json::to_string(&leaf).expect("serialization failed"),
            r#"{"key":"/a","dir":false,"value":"first"}"#
        );

        let bare = Node::new_file("/a", None);
        assert_eq!(
            serde_json::to_string(&bare).expect("serialization failed"),
            r#"{"key":"/a","dir":false,"value":null}"#
        );
    }

    #[test]
    fn directory_serializes_children_as_nodes() {
        let snap = sample_tree().snapshot(true, true);
        assert_eq!(
            serde_json::to_string(&snap).expect("serialization failed"),
            concat!(
                r#"{"key":"/","dir":true,"nodes":["#,
                r#"{"key":"/a","dir":false,"value":"first"},"#,
                r#"{"key":"/b","dir":true,"nodes":[{"key":"/b/deep","dir":false,"value":"buried"}]}"#,
                r#"]}"#
            )
        );
    }
}
