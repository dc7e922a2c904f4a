pub mod codec;
pub mod error;
pub mod result;
pub mod value;
pub mod vertex_edge_path;

// 错误和结果类型
pub use error::{
    DecodeError, GraphError, GraphResult, LookupError, MetadataError, TransportError,
};

// 核心数据类型
pub use value::*;
pub use vertex_edge_path::{Edge, Node, Path};

// 解码与结果集
pub use codec::{EntityDecoder, Reply, ResponseDecoder, ValueDecoder};
pub use result::{Column, ColumnType, Header, Record, ResultSet, Statistic, Statistics};
