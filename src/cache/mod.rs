//! 元数据缓存模块
//!
//! 把回复中按序号压缩的标签、关系类型、属性键还原为名称

pub mod metadata_cache;
pub mod table;
pub mod traits;

pub use metadata_cache::MetadataCache;
pub use table::SchemaTable;
pub use traits::{NoSchema, SchemaKind, SchemaResolver, StaticSchema};
