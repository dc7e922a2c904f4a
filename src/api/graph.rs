//! 图客户端
//!
//! 绑定一个图名、一个传输层和该图独享的元数据缓存

use log::{debug, info};
use std::sync::Arc;

use crate::api::transport::{Transport, COMPACT_FLAG, GRAPH_DELETE, GRAPH_EXPLAIN, GRAPH_QUERY};
use crate::cache::MetadataCache;
use crate::config::Config;
use crate::core::codec::{Reply, ResponseDecoder};
use crate::core::error::{DecodeError, GraphError, GraphResult};
use crate::core::result::ResultSet;
use crate::utils::procedure_call;

/// 单个图的查询入口
///
/// # 示例
///
/// ```ignore
/// use redisgraph::api::Graph;
///
/// let graph = Graph::new("social", transport);
/// let mut result = graph.query("MATCH (a:person) RETURN a.name")?;
/// while result.has_next() {
///     println!("{}", result.next()?.get_str("a.name")?);
/// }
/// ```
pub struct Graph {
    id: String,
    transport: Arc<dyn Transport>,
    schema: Arc<MetadataCache>,
    decoder: ResponseDecoder,
}

impl Graph {
    pub fn new(id: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let id = id.into();
        let schema = Arc::new(MetadataCache::new(id.clone(), Arc::clone(&transport)));
        let decoder = ResponseDecoder::new(schema.clone());
        Self {
            id,
            transport,
            schema,
            decoder,
        }
    }

    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self::new(config.graph.clone(), transport)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 该图的元数据缓存，生命周期与客户端相同
    pub fn schema(&self) -> &Arc<MetadataCache> {
        &self.schema
    }

    /// 执行查询
    ///
    /// # 参数
    /// - `query`: Cypher 查询语句
    ///
    /// # 返回
    /// 结果集；行在首次访问时才解码
    pub fn query(&self, query: &str) -> GraphResult<ResultSet> {
        debug!("GRAPH.QUERY {}: {}", self.id, query);
        let args = [self.id.clone(), query.to_string(), COMPACT_FLAG.to_string()];
        let reply = self.transport.execute(GRAPH_QUERY, &args)?;
        self.decoder.decode(reply)
    }

    /// 调用存储过程，参数按字符串字面量传入
    pub fn call_procedure<S: AsRef<str>>(&self, name: &str, args: &[S]) -> GraphResult<ResultSet> {
        self.query(&procedure_call(name, args))
    }

    /// 返回执行计划，每个算子一行
    pub fn explain(&self, query: &str) -> GraphResult<Vec<String>> {
        let args = [self.id.clone(), query.to_string()];
        match self.transport.execute(GRAPH_EXPLAIN, &args)? {
            Reply::Error(message) => Err(GraphError::Server(message)),
            Reply::String(plan) => Ok(plan.lines().map(str::to_string).collect()),
            Reply::Array(lines) => lines
                .iter()
                .map(|line| {
                    line.as_str().map(str::to_string).ok_or_else(|| {
                        GraphError::from(DecodeError::malformed("plan line", "string", line))
                    })
                })
                .collect(),
            other => Err(DecodeError::unexpected("explain reply", &other).into()),
        }
    }

    /// 删除整个图，返回服务端的状态信息
    ///
    /// 元数据缓存不会被清空
    pub fn delete(&self) -> GraphResult<String> {
        let reply = self.transport.execute(GRAPH_DELETE, &[self.id.clone()])?;
        let message = match reply {
            Reply::Error(message) => return Err(GraphError::Server(message)),
            Reply::String(message) => message,
            Reply::Array(sections) => sections
                .iter()
                .filter_map(Reply::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
            other => return Err(DecodeError::unexpected("delete reply", &other).into()),
        };
        info!("graph {} deleted: {}", self.id, message);
        Ok(message)
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("schema", &self.schema)
            .finish()
    }
}
