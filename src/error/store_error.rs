use serde::{Deserialize, Serialize};
use snafu::Snafu;

use super::error_code::ErrorKind;
use super::message_registry::MessageRegistry;

/// A classified store failure: numeric code, template-derived message, and
/// the situational cause (usually the key the operation was aimed at).
///
/// Serializes as `{"ErrorCode": .., "Message": .., "Cause": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Snafu, Serialize, Deserialize)]
#[snafu(display("{} ({})", message, cause))]
pub struct StoreError {
    #[serde(rename = "ErrorCode")]
    code: u32,
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "Cause")]
    cause: String,
}

impl StoreError {
    /// Builds an error for an arbitrary numeric code. The message is
    /// resolved against `messages` now; codes it does not know yield `""`.
    pub fn new(code: u32, cause: impl Into<String>, messages: &MessageRegistry) -> Self {
        Self {
            code,
            message: messages.message(code).to_string(),
            cause: cause.into(),
        }
    }

    /// Builds an error for one of the store's own kinds.
    pub fn of(kind: ErrorKind, cause: impl Into<String>, messages: &MessageRegistry) -> Self {
        Self::new(kind.code(), cause, messages)
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }

    /// The kind this error classifies as, when the code is one of ours.
    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_code(self.code)
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.code == kind.code()
    }

    /// True iff `err` holds an error whose code equals `code`.
    pub fn is(err: Option<&StoreError>, code: u32) -> bool {
        err.is_some_and(|e| e.code == code)
    }

    /// JSON rendering of the error. Falls back to `"{}"` if serialization
    /// fails rather than propagating the failure.
    pub fn json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}
