//! Error types for graph decoding.
//!
//! Decoding distinguishes two severities:
//! - [`DecodeError`] aborts the whole call and yields no graph.
//! - [`NodeError`] is recorded against one node or field; decoding carries
//!   on and all of them are returned together as [`DecodeErrors`].

use std::fmt;

use thiserror::Error;

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// L001: Malformed document root
    MalformedDocument,
    /// L002: Unknown context
    UnknownContext,
    /// L003: Missing or unknown type discriminator
    UnknownType,
    /// L004: Value does not fit the field
    TypeMismatch,
    /// L005: Decoding limit exceeded
    LimitExceeded,
    /// L006: Identifier problem
    Identity,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "L001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MalformedDocument => "L001",
            ErrorCode::UnknownContext => "L002",
            ErrorCode::UnknownType => "L003",
            ErrorCode::TypeMismatch => "L004",
            ErrorCode::LimitExceeded => "L005",
            ErrorCode::Identity => "L006",
        }
    }
}

/// Error that prevents any graph from being produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("[L001] document root must be an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("[L001] document has no string @context")]
    MissingContext,

    #[error("[L001] @graph array not present in root object")]
    MissingGraph,

    #[error("[L001] invalid JSON: {0}")]
    Json(String),

    #[error("[L002] unknown document @context: {context:?}")]
    UnknownContext { context: String },

    #[error("[L005] @graph has {len} nodes, exceeding maximum {max}")]
    TooManyNodes { len: usize, max: usize },
}

impl DecodeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::UnknownContext { .. } => ErrorCode::UnknownContext,
            DecodeError::TooManyNodes { .. } => ErrorCode::LimitExceeded,
            _ => ErrorCode::MalformedDocument,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

/// Error recorded against one node or field. `path` locates the offending
/// value, e.g. `@graph[6].to[0]`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    #[error("[L001] {path}: expected a node object or identifier, found {found}")]
    UnexpectedValue { path: String, found: &'static str },

    #[error("[L003] {path}: node has no string type")]
    MissingType { path: String },

    #[error("[L003] {path}: unknown type {type_name:?}")]
    UnknownType { path: String, type_name: String },

    #[error("[L004] {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("[L004] {path}: field {field:?} is declared with a shape its record does not store")]
    ShapeMismatch { path: String, field: &'static str },

    #[error("[L005] {path}: inline nodes nested deeper than {max}")]
    NestingTooDeep { path: String, max: usize },

    #[error("[L006] {path}: {id:?} is already a {existing}, not a {declared}")]
    TypeConflict {
        path: String,
        id: String,
        existing: &'static str,
        declared: &'static str,
    },

    #[error("[L006] {path}: reference to undefined node {id:?}")]
    UnresolvedReference { path: String, id: String },
}

impl NodeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NodeError::UnexpectedValue { .. } => ErrorCode::MalformedDocument,
            NodeError::MissingType { .. } | NodeError::UnknownType { .. } => ErrorCode::UnknownType,
            NodeError::TypeMismatch { .. } | NodeError::ShapeMismatch { .. } => {
                ErrorCode::TypeMismatch
            }
            NodeError::NestingTooDeep { .. } => ErrorCode::LimitExceeded,
            NodeError::TypeConflict { .. } | NodeError::UnresolvedReference { .. } => {
                ErrorCode::Identity
            }
        }
    }

    /// Location of the offending value.
    pub fn path(&self) -> &str {
        match self {
            NodeError::UnexpectedValue { path, .. }
            | NodeError::MissingType { path }
            | NodeError::UnknownType { path, .. }
            | NodeError::TypeMismatch { path, .. }
            | NodeError::ShapeMismatch { path, .. }
            | NodeError::NestingTooDeep { path, .. }
            | NodeError::TypeConflict { path, .. }
            | NodeError::UnresolvedReference { path, .. } => path,
        }
    }
}

/// All non-fatal errors of one decode, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeErrors {
    errors: Vec<NodeError>,
}

impl DecodeErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: NodeError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<NodeError> {
        self.errors
    }
}

impl fmt::Display for DecodeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("no errors"),
            [only] => fmt::Display::fmt(only, f),
            all => {
                write!(f, "{} errors:", all.len())?;
                for err in all {
                    write!(f, "\n  {err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DecodeErrors {}

impl IntoIterator for DecodeErrors {
    type Item = NodeError;
    type IntoIter = std::vec::IntoIter<NodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodeErrors {
    type Item = &'a NodeError;
    type IntoIter = std::slice::Iter<'a, NodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl Extend<NodeError> for DecodeErrors {
    fn extend<I: IntoIterator<Item = NodeError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(DecodeError::MissingGraph.code().code(), "L001");
        assert_eq!(
            DecodeError::UnknownContext {
                context: "x".into()
            }
            .code(),
            ErrorCode::UnknownContext
        );
        let err = NodeError::UnknownType {
            path: "@graph[0]".into(),
            type_name: "Nope".into(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownType);
        assert_eq!(err.path(), "@graph[0]");
        assert_eq!(err.to_string(), "[L003] @graph[0]: unknown type \"Nope\"");
    }

    #[test]
    fn test_aggregate_display() {
        let mut errors = DecodeErrors::new();
        assert_eq!(errors.to_string(), "no errors");
        errors.push(NodeError::MissingType {
            path: "@graph[1]".into(),
        });
        assert_eq!(errors.to_string(), "[L003] @graph[1]: node has no string type");
        errors.push(NodeError::TypeMismatch {
            path: "@graph[2].name".into(),
            expected: "string",
            found: "integer",
        });
        let text = errors.to_string();
        assert!(text.starts_with("2 errors:"));
        assert!(text.contains("@graph[2].name: expected string, found integer"));
        assert_eq!(errors.iter().count(), 2);
    }
}
