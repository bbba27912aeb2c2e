//! Error classification shared across the store.
//!
//! Failures carry a numeric code, a template-derived message, and a
//! situational cause. Codes are the stable contract; messages come from a
//! [`MessageRegistry`] and can be re-registered at runtime, so callers
//! branch on [`ErrorKind`] or the code rather than on message text.

mod error_code;
mod message_registry;
mod store_error;

pub use error_code::ErrorKind;
pub use message_registry::MessageRegistry;
pub use store_error::StoreError;
