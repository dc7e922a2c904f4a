//! Smaller error types
//!
//! Schema resolution, caller-side lookups and the transport boundary.

use thiserror::Error;

use crate::cache::SchemaKind;
use crate::core::value::ValueType;

/// A schema index that is still unknown after a full table refresh
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("{kind} index {index} unresolved after refresh ({known} known)")]
    Unresolved {
        kind: SchemaKind,
        index: usize,
        known: usize,
    },
}

/// Record and cursor access errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("column index {index} out of range for {len} columns")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("record index {index} out of range for {len} records")]
    RecordOutOfRange { index: usize, len: usize },

    #[error("no more records")]
    NoMoreRecords,

    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: ValueType,
        actual: ValueType,
    },
}

/// Failures reported by the transport collaborator
///
/// Never retried here: only the transport knows whether a retry is safe.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed")]
    Closed,

    #[error("transport error: {0}")]
    Other(String),
}
