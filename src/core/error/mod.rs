//! Unified error handling for the reply decoder
//!
//! ## Layout
//!
//! 1. Each concern gets its own narrow enum:
//!    - `DecodeError` for malformed reply fragments
//!    - `MetadataError` for schema indices that stay unresolved after a refresh
//!    - `LookupError` for record/cursor access by the caller
//!    - `TransportError` for failures reported by the transport collaborator
//!
//! 2. `GraphError` aggregates them with `#[from]` conversions so `?` works
//!    across layers; transport failures pass through untouched.
//!
//! 3. `GraphResult<T>` is the return type of every fallible public operation.

use thiserror::Error;

pub mod decode;
pub mod other;

pub use decode::DecodeError;
pub use other::{LookupError, MetadataError, TransportError};

/// Top-level error type
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Error reply sent in-band by the server
    #[error("server error: {0}")]
    Server(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Unified result type
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Whether the failure came from the caller's own access pattern
    /// (and can be avoided by checking before calling)
    pub fn is_lookup(&self) -> bool {
        matches!(self, GraphError::Lookup(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, GraphError::Decode(_))
    }

    pub fn is_metadata(&self) -> bool {
        matches!(self, GraphError::Metadata(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GraphError::Transport(_))
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_creation() {
        let err: GraphError = LookupError::NoMoreRecords.into();
        assert!(err.is_lookup());
        assert_eq!(err.to_string(), "lookup error: no more records");
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err: GraphError = TransportError::Closed.into();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), TransportError::Closed.to_string());
    }

    #[test]
    fn test_decode_error_conversion() {
        let err: GraphError = DecodeError::PathAlternation { nodes: 2, edges: 2 }.into();
        assert!(err.is_decode());
        assert!(!err.is_metadata());
    }
}
