use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use hashlink::LinkedHashMap;
use tracing::{debug, warn};

use crate::error::{ErrorKind, MessageRegistry, StoreError};

use super::node::{Node, NodeKind};
use super::path::{self, Lookup};
use super::result::{Action, OpResult};

/// The store seam consumed by higher-level request handlers.
///
/// Keys are normalized to canonical absolute paths before resolution, so
/// `xxx` and `/xxx` address the same node. Every mutation reports the node
/// after the operation and its prior state for audit/diffing.
pub trait FileSystemStore {
    /// Reads the node at `key`. `recursive` includes the whole subtree of a
    /// directory instead of just its immediate children; `sorted` orders
    /// listings lexicographically.
    fn get(&self, key: &str, recursive: bool, sorted: bool) -> Result<OpResult, StoreError>;

    /// Idempotent upsert: creates the node if absent, otherwise replaces
    /// its kind and content unconditionally, capturing the old node.
    fn set(&self, key: &str, is_directory: bool, value: &str) -> Result<OpResult, StoreError>;

    /// Creates a new node, vivifying missing intermediate directories.
    /// `value` is ignored when `is_directory`.
    fn create(
        &self,
        key: &str,
        is_directory: bool,
        value: &str,
    ) -> Result<OpResult, StoreError>;

    /// Replaces the value of an existing leaf.
    fn update(&self, key: &str, value: &str) -> Result<OpResult, StoreError>;

    /// Removes the node at `key`. Deleting a directory requires `dir` (or
    /// `recursive`); deleting a non-empty directory requires `recursive`.
    fn delete(&self, key: &str, recursive: bool, dir: bool) -> Result<OpResult, StoreError>;
}

/// Default in-memory implementation backed by a single tree under a global
/// read-write lock: reads share it, mutations hold it exclusively across
/// resolve, validate, mutate, and snapshot.
pub struct MemoryStore {
    root: RwLock<Node>,
    messages: RwLock<MessageRegistry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_messages(MessageRegistry::with_defaults())
    }

    /// A store with a caller-supplied message registry.
    pub fn with_messages(messages: MessageRegistry) -> Self {
        MemoryStore {
            root: RwLock::new(Node::root()),
            messages: RwLock::new(messages),
        }
    }

    /// Merges `templates` into the store's message registry. Later
    /// registrations overwrite conflicting codes; the rest are retained.
    /// Errors constructed afterwards pick up the new templates.
    pub fn set_error_messages(&self, templates: HashMap<u32, String>) {
        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .merge(templates);
    }

    fn error(&self, kind: ErrorKind, cause: impl Into<String>) -> StoreError {
        let messages = self.messages.read().unwrap_or_else(PoisonError::into_inner);
        StoreError::of(kind, cause, &messages)
    }

    /// Walks to the directory owning the final segment of `requested`,
    /// creating missing intermediates when `vivify`. Fails with `NotDir`
    /// when a leaf occupies any step of the way, naming the leaf, and with
    /// `NotExists` (naming the requested key) when a step is absent and
    /// vivification is off.
    fn descend<'a>(
        &self,
        root: &'a mut Node,
        parent_path: &str,
        requested: &str,
        vivify: bool,
    ) -> Result<&'a mut LinkedHashMap<String, Node>, StoreError> {
        let mut current = root;
        let mut walked = String::new();
        for segment in path::segments(parent_path) {
            walked.push('/');
            walked.push_str(segment);
            let node = current;
            match &mut node.kind {
                NodeKind::Directory { children } => {
                    if vivify {
                        current = children
                            .entry(segment.to_string())
                            .or_insert_with(|| Node::new_directory(walked.clone()));
                    } else {
                        current = match children.get_mut(segment) {
                            Some(child) => child,
                            None => {
                                return Err(self.error(ErrorKind::NotExists, requested));
                            }
                        };
                    }
                }
                NodeKind::File { .. } => {
                    return Err(self.error(ErrorKind::NotDir, node.key.clone()));
                }
            }
        }
        match &mut current.kind {
            NodeKind::Directory { children } => Ok(children),
            NodeKind::File { .. } => Err(self.error(ErrorKind::NotDir, current.key.clone())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemStore for MemoryStore {
    fn get(&self, key: &str, recursive: bool, sorted: bool) -> Result<OpResult, StoreError> {
        let key = path::canonicalize(key);
        debug!("get {} (recursive: {}, sorted: {})", key, recursive, sorted);

        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        match path::lookup(&root, &key) {
            Lookup::Found(node) => Ok(OpResult::new(
                Action::Get,
                node.snapshot(recursive, sorted),
            )),
            Lookup::Missing { deepest } => {
                debug!("get {} stopped at {}", key, deepest.key());
                Err(self.error(ErrorKind::NotExists, key))
            }
            Lookup::Blocked { leaf } => Err(self.error(ErrorKind::NotDir, leaf.key())),
        }
    }

    fn set(&self, key: &str, is_directory: bool, value: &str) -> Result<OpResult, StoreError> {
        let key = path::canonicalize(key);
        debug!("set {} (dir: {})", key, is_directory);

        let Some((parent_path, name)) = path::split_last(&key) else {
            warn!("set rejected, the root cannot be replaced");
            return Err(self.error(ErrorKind::Unknown, key));
        };
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let children = self.descend(&mut root, parent_path, &key, true)?;

        let prev = children.get(name).map(|node| node.snapshot(true, false));
        let node = if is_directory {
            Node::new_directory(key.clone())
        } else {
            Node::new_file(key.clone(), Some(value.to_string()))
        };
        let snapshot = node.snapshot(false, false);
        children.insert(name.to_string(), node);

        Ok(match prev {
            Some(prev) => OpResult::with_prev(Action::Set, snapshot, prev),
            None => OpResult::new(Action::Set, snapshot),
        })
    }

    fn create(
        &self,
        key: &str,
        is_directory: bool,
        value: &str,
    ) -> Result<OpResult, StoreError> {
        let key = path::canonicalize(key);
        debug!("create {} (dir: {})", key, is_directory);

        let Some((parent_path, name)) = path::split_last(&key) else {
            warn!("create rejected, {} already exists", key);
            return Err(self.error(ErrorKind::Exists, key));
        };
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let children = self.descend(&mut root, parent_path, &key, true)?;

        if children.contains_key(name) {
            warn!("create rejected, {} already exists", key);
            return Err(self.error(ErrorKind::Exists, key));
        }
        let node = if is_directory {
            Node::new_directory(key.clone())
        } else {
            Node::new_file(key.clone(), Some(value.to_string()))
        };
        let snapshot = node.snapshot(false, false);
        children.insert(name.to_string(), node);

        Ok(OpResult::new(Action::Create, snapshot))
    }

    fn update(&self, key: &str, value: &str) -> Result<OpResult, StoreError> {
        let key = path::canonicalize(key);
        debug!("update {}", key);

        let Some((parent_path, name)) = path::split_last(&key) else {
            warn!("update rejected, the root is a directory");
            return Err(self.error(ErrorKind::NotFile, key));
        };
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let children = self.descend(&mut root, parent_path, &key, false)?;

        let Some(node) = children.get_mut(name) else {
            return Err(self.error(ErrorKind::NotExists, key));
        };
        if node.is_directory() {
            warn!("update rejected, {} is a directory", key);
            return Err(self.error(ErrorKind::NotFile, key));
        }
        let prev = node.snapshot(false, false);
        node.kind = NodeKind::File {
            value: Some(value.to_string()),
        };

        Ok(OpResult::with_prev(
            Action::Update,
            node.snapshot(false, false),
            prev,
        ))
    }

    fn delete(&self, key: &str, recursive: bool, dir: bool) -> Result<OpResult, StoreError> {
        let key = path::canonicalize(key);
        debug!("delete {} (recursive: {}, dir: {})", key, recursive, dir);

        let Some((parent_path, name)) = path::split_last(&key) else {
            warn!("delete rejected, the root cannot be removed");
            return Err(self.error(ErrorKind::Unknown, key));
        };
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let children = self.descend(&mut root, parent_path, &key, false)?;

        let Some(node) = children.get(name) else {
            return Err(self.error(ErrorKind::NotExists, key));
        };
        if let NodeKind::Directory {
            children: node_children,
        } = &node.kind
        {
            // Removing a directory must be asked for explicitly.
            if !dir && !recursive {
                warn!("delete rejected, {} is a directory", key);
                return Err(self.error(ErrorKind::NotFile, key));
            }
            if !node_children.is_empty() && !recursive {
                warn!("delete rejected, {} is not empty", key);
                return Err(self.error(ErrorKind::DirNotEmpty, key));
            }
        }
        let snapshot = node.snapshot(true, false);
        children.remove(name);

        Ok(OpResult::with_prev(
            Action::Delete,
            snapshot.clone(),
            snapshot,
        ))
    }
}
