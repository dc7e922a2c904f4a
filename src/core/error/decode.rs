//! Decode errors
//!
//! Raised when a reply fragment does not match the shape its tag promises.
//! Every variant carries enough of the offending fragment to diagnose it.

use thiserror::Error;

use crate::core::codec::Reply;

/// Errors produced while turning a raw reply into typed values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("unrecognized value tag {tag}: {snippet}")]
    UnknownTag { tag: i64, snippet: String },

    #[error("malformed {context} payload, expected {expected}: {snippet}")]
    Malformed {
        context: &'static str,
        expected: &'static str,
        snippet: String,
    },

    #[error("invalid {context} literal: {snippet}")]
    InvalidNumber {
        context: &'static str,
        snippet: String,
    },

    #[error("record {row} has {actual} columns, header declares {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("path alternation broken: {nodes} nodes, {edges} edges")]
    PathAlternation { nodes: usize, edges: usize },

    #[error("unexpected reply shape ({context}): {snippet}")]
    UnexpectedReply {
        context: &'static str,
        snippet: String,
    },
}

impl DecodeError {
    pub fn unknown_tag(tag: i64, fragment: &Reply) -> Self {
        DecodeError::UnknownTag {
            tag,
            snippet: fragment.snippet(),
        }
    }

    pub fn malformed(context: &'static str, expected: &'static str, payload: &Reply) -> Self {
        DecodeError::Malformed {
            context,
            expected,
            snippet: payload.snippet(),
        }
    }

    pub fn invalid_number(context: &'static str, payload: &Reply) -> Self {
        DecodeError::InvalidNumber {
            context,
            snippet: payload.snippet(),
        }
    }

    pub fn unexpected(context: &'static str, reply: &Reply) -> Self {
        DecodeError::UnexpectedReply {
            context,
            snippet: reply.snippet(),
        }
    }
}
