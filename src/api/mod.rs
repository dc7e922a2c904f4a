//! 客户端接口
//!
//! `Graph` 负责组装命令，`Transport` 负责收发；网络实现由调用方提供

pub mod graph;
pub mod transport;

pub use graph::Graph;
pub use transport::{Transport, COMPACT_FLAG, GRAPH_DELETE, GRAPH_EXPLAIN, GRAPH_QUERY};
