//! 图元数据缓存
//!
//! 每个图连接独享一份：标签、关系类型、属性键三张表互不影响，
//! 未命中的序号通过 `CALL db.labels()` 等过程整表刷新。

use log::debug;
use std::fmt;
use std::sync::Arc;

use crate::api::transport::{Transport, COMPACT_FLAG, GRAPH_QUERY};
use crate::cache::{NoSchema, SchemaKind, SchemaResolver, SchemaTable};
use crate::core::codec::ResponseDecoder;
use crate::core::error::GraphResult;
use crate::utils::procedure_call;

pub struct MetadataCache {
    graph: String,
    transport: Arc<dyn Transport>,
    labels: SchemaTable,
    relationship_types: SchemaTable,
    property_keys: SchemaTable,
}

impl MetadataCache {
    /// 创建空缓存，首次解析时才会访问服务端
    pub fn new(graph: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            graph: graph.into(),
            transport,
            labels: SchemaTable::new(SchemaKind::Label),
            relationship_types: SchemaTable::new(SchemaKind::RelationshipType),
            property_keys: SchemaTable::new(SchemaKind::PropertyKey),
        }
    }

    pub fn graph(&self) -> &str {
        &self.graph
    }

    fn table(&self, kind: SchemaKind) -> &SchemaTable {
        match kind {
            SchemaKind::Label => &self.labels,
            SchemaKind::RelationshipType => &self.relationship_types,
            SchemaKind::PropertyKey => &self.property_keys,
        }
    }

    /// 强制刷新一张表，返回刷新后的长度
    pub fn refresh(&self, kind: SchemaKind) -> GraphResult<usize> {
        self.table(kind).refresh(|| self.fetch(kind))
    }

    pub fn names(&self, kind: SchemaKind) -> Vec<String> {
        self.table(kind).snapshot()
    }

    pub fn labels(&self) -> Vec<String> {
        self.names(SchemaKind::Label)
    }

    pub fn relationship_types(&self) -> Vec<String> {
        self.names(SchemaKind::RelationshipType)
    }

    pub fn property_keys(&self) -> Vec<String> {
        self.names(SchemaKind::PropertyKey)
    }

    pub fn len(&self, kind: SchemaKind) -> usize {
        self.table(kind).len()
    }

    pub fn is_empty(&self, kind: SchemaKind) -> bool {
        self.table(kind).is_empty()
    }

    /// 已发出的刷新请求数（含失败的）
    pub fn refresh_count(&self, kind: SchemaKind) -> u64 {
        self.table(kind).refresh_count()
    }

    /// One round trip: `GRAPH.QUERY <graph> "CALL db.labels()" --compact`
    fn fetch(&self, kind: SchemaKind) -> GraphResult<Vec<String>> {
        let query = procedure_call::<&str>(kind.procedure(), &[]);
        debug!("graph {}: {}", self.graph, query);

        let args = [self.graph.clone(), query, COMPACT_FLAG.to_string()];
        let reply = self.transport.execute(GRAPH_QUERY, &args)?;

        // 过程结果只含字符串列，无需再回到本缓存解析名称
        let mut result = ResponseDecoder::new(Arc::new(NoSchema)).decode(reply)?;
        let mut names = Vec::with_capacity(result.len());
        while result.has_next() {
            names.push(result.next()?.get_str(0)?.to_string());
        }
        Ok(names)
    }
}

impl SchemaResolver for MetadataCache {
    fn resolve(&self, kind: SchemaKind, index: usize) -> GraphResult<String> {
        self.table(kind).resolve(index, || self.fetch(kind))
    }
}

impl fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataCache")
            .field("graph", &self.graph)
            .field("labels", &self.labels.len())
            .field("relationship_types", &self.relationship_types.len())
            .field("property_keys", &self.property_keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::Reply;
    use crate::core::error::TransportError;
    use parking_lot::Mutex;
    use serde_json::json;

    /// Answers each procedure with a fixed list and records every call
    struct Procedures {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl Transport for Procedures {
        fn execute(&self, command: &str, args: &[String]) -> Result<Reply, TransportError> {
            self.calls.lock().push(
                std::iter::once(command.to_string())
                    .chain(args.iter().cloned())
                    .collect(),
            );
            let names = match args.get(1).map(String::as_str) {
                Some("CALL db.labels()") => json!([[[2, "person"]], [[2, "country"]]]),
                Some("CALL db.relationshipTypes()") => json!([[[2, "knows"]]]),
                _ => json!([]),
            };
            Reply::try_from(json!([[[1, "name"]], names, []]))
                .map_err(|e| TransportError::Other(e.to_string()))
        }
    }

    fn cache() -> (Arc<Procedures>, MetadataCache) {
        let transport = Arc::new(Procedures {
            calls: Mutex::new(Vec::new()),
        });
        let cache = MetadataCache::new("social", transport.clone());
        (transport, cache)
    }

    #[test]
    fn test_resolve_fetches_lazily() {
        let (transport, cache) = cache();
        assert!(cache.is_empty(SchemaKind::Label));

        assert_eq!(cache.label(1).ok(), Some("country".to_string()));
        assert_eq!(cache.label(0).ok(), Some("person".to_string()));
        assert_eq!(cache.refresh_count(SchemaKind::Label), 1);
        assert_eq!(
            transport.calls.lock()[0],
            vec!["GRAPH.QUERY", "social", "CALL db.labels()", "--compact"]
        );
    }

    #[test]
    fn test_tables_refresh_independently() {
        let (transport, cache) = cache();
        assert_eq!(cache.relationship_type(0).ok(), Some("knows".to_string()));
        assert_eq!(cache.refresh_count(SchemaKind::Label), 0);
        assert_eq!(cache.refresh_count(SchemaKind::RelationshipType), 1);

        assert!(cache.property_key(0).unwrap_err().is_metadata());
        assert_eq!(transport.calls.lock().len(), 2);
    }

    #[test]
    fn test_explicit_refresh() {
        let (_, cache) = cache();
        assert_eq!(cache.refresh(SchemaKind::Label).ok(), Some(2));
        assert_eq!(cache.labels(), vec!["person", "country"]);
        assert!(format!("{:?}", cache).contains("labels: 2"));
    }
}
