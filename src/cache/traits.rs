//! 名称解析接口
//!
//! 解码器只依赖 `SchemaResolver`，不关心名称表从何而来

use serde::Serialize;
use std::fmt;

use crate::core::error::{GraphResult, MetadataError};

/// 三类按序号压缩的名称表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SchemaKind {
    Label,
    RelationshipType,
    PropertyKey,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [
        SchemaKind::Label,
        SchemaKind::RelationshipType,
        SchemaKind::PropertyKey,
    ];

    /// Introspection procedure that lists the whole table
    pub fn procedure(self) -> &'static str {
        match self {
            SchemaKind::Label => "db.labels",
            SchemaKind::RelationshipType => "db.relationshipTypes",
            SchemaKind::PropertyKey => "db.propertyKeys",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SchemaKind::Label => "label",
            SchemaKind::RelationshipType => "relationship type",
            SchemaKind::PropertyKey => "property key",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 序号到名称的解析
pub trait SchemaResolver: Send + Sync {
    fn resolve(&self, kind: SchemaKind, index: usize) -> GraphResult<String>;

    fn label(&self, index: usize) -> GraphResult<String> {
        self.resolve(SchemaKind::Label, index)
    }

    fn relationship_type(&self, index: usize) -> GraphResult<String> {
        self.resolve(SchemaKind::RelationshipType, index)
    }

    fn property_key(&self, index: usize) -> GraphResult<String> {
        self.resolve(SchemaKind::PropertyKey, index)
    }
}

/// 不含任何名称，用于解码元数据过程自身的回复
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl SchemaResolver for NoSchema {
    fn resolve(&self, kind: SchemaKind, index: usize) -> GraphResult<String> {
        Err(MetadataError::Unresolved {
            kind,
            index,
            known: 0,
        }
        .into())
    }
}

/// 固定名称表，不做刷新
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    labels: Vec<String>,
    relationship_types: Vec<String>,
    property_keys: Vec<String>,
}

impl StaticSchema {
    pub fn new(
        labels: Vec<String>,
        relationship_types: Vec<String>,
        property_keys: Vec<String>,
    ) -> Self {
        Self {
            labels,
            relationship_types,
            property_keys,
        }
    }

    pub fn names(&self, kind: SchemaKind) -> &[String] {
        match kind {
            SchemaKind::Label => &self.labels,
            SchemaKind::RelationshipType => &self.relationship_types,
            SchemaKind::PropertyKey => &self.property_keys,
        }
    }
}

impl SchemaResolver for StaticSchema {
    fn resolve(&self, kind: SchemaKind, index: usize) -> GraphResult<String> {
        let names = self.names(kind);
        names.get(index).cloned().ok_or_else(|| {
            MetadataError::Unresolved {
                kind,
                index,
                known: names.len(),
            }
            .into()
        })
    }
}
