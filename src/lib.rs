//! In-memory hierarchical key/value store with filesystem-like semantics.
//!
//! Keys are absolute slash-delimited paths; nodes are directories or
//! leaves. [`MemoryStore`] supports atomic `get`, `set`, `create`, `update`,
//! and `delete`, each returning an [`OpResult`] carrying the node after the
//! operation and its prior state, or a classified [`StoreError`].
//!
//! ```
//! use arbor::{FileSystemStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.create("/services/api", false, "10.0.0.1").unwrap();
//!
//! let updated = store.update("/services/api", "10.0.0.2").unwrap();
//! assert_eq!(updated.curr_node().value(), Some("10.0.0.2"));
//! assert_eq!(updated.prev_node().unwrap().value(), Some("10.0.0.1"));
//! ```

pub mod error;
pub mod logging;
pub mod store;

pub use error::{ErrorKind, MessageRegistry, StoreError};
pub use logging::LogLevel;
pub use store::{Action, FileSystemStore, MemoryStore, Node, NodeKind, OpResult};
