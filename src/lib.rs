//! RedisGraph client - compact reply decoding
//!
//! Sends Cypher queries through a caller-supplied [`Transport`] and decodes the
//! `--compact` reply into a [`ResultSet`]. Label, relationship type and
//! property key indices are resolved through a per-graph [`MetadataCache`].

pub mod api;
pub mod cache;
pub mod config;
pub mod core;
pub mod utils;

pub use crate::api::{Graph, Transport};
pub use crate::cache::{MetadataCache, SchemaKind, SchemaResolver};
pub use crate::config::Config;
pub use crate::core::{
    Edge, GraphError, GraphResult, Node, Path, Point, Record, Reply, ResultSet, Statistics, Value,
    ValueType,
};
