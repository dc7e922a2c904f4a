//! 传输层接口
//!
//! 连接管理、超时与重试都属于传输层；这里只约定一次请求/回复

use crate::core::codec::Reply;
use crate::core::error::TransportError;

pub const GRAPH_QUERY: &str = "GRAPH.QUERY";
pub const GRAPH_EXPLAIN: &str = "GRAPH.EXPLAIN";
pub const GRAPH_DELETE: &str = "GRAPH.DELETE";

/// Asks the server for the compact, index-compressed reply format
pub const COMPACT_FLAG: &str = "--compact";

/// Sends one command and blocks until its reply is available
///
/// Shared by the query path and the metadata refresh path, so implementations
/// must accept concurrent calls.
pub trait Transport: Send + Sync {
    fn execute(&self, command: &str, args: &[String]) -> Result<Reply, TransportError>;
}
