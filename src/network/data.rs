use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;

/// The remote operations a client can request.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Set,
    Get,
    Delete,
}

impl Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Set => write!(f, "set"),
            Op::Get => write!(f, "get"),
            Op::Delete => write!(f, "delete"),
        }
    }
}

impl slog::Value for Op {
    fn serialize(
        &self,
        _rec: &slog::Record,
        key: slog::Key,
        serializer: &mut dyn slog::Serializer,
    ) -> slog::Result {
        match self {
            Op::Set => serializer.emit_str(key, "set"),
            Op::Get => serializer.emit_str(key, "get"),
            Op::Delete => serializer.emit_str(key, "delete"),
        }
    }
}

/// The network representation of a request to the remote store.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Request {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

impl Request {
    #[allow(missing_docs)]
    pub fn op(&self) -> Op {
        match self {
            Request::Set { .. } => Op::Set,
            Request::Get { .. } => Op::Get,
            Request::Delete { .. } => Op::Delete,
        }
    }

    /// The key this request was issued for.
    pub fn key(&self) -> &str {
        match self {
            Request::Set { key, .. } | Request::Get { key } | Request::Delete { key } => key,
        }
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Set { key, value } => write!(f, "Set '{}' to '{}'", key, value),
            Request::Get { key } => write!(f, "Get '{}'", key),
            Request::Delete { key } => write!(f, "Delete '{}'", key),
        }
    }
}

/// The network representation of a response from the remote store.
///
/// Every field is optional on the wire. Which ones must be present depends on the
/// operation that was requested; a non-empty `error` marks a failed operation.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// The error reported by the remote side, ignoring an empty `error` field.
    pub fn failure(&self) -> Option<&str> {
        self.error.as_ref().map(String::as_str).filter(|e| !e.is_empty())
    }
}
