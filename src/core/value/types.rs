use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::core::value::Point;
use crate::core::vertex_edge_path::{Edge, Node, Path};

/// Value type tags, numbered as in the compact reply protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueType {
    Unknown = 0,
    Null = 1,
    String = 2,
    Integer = 3,
    Boolean = 4,
    Double = 5,
    Array = 6,
    Edge = 7,
    Node = 8,
    Path = 9,
    Map = 10,
    Point = 11,
}

impl ValueType {
    /// Map a wire tag to its type, `None` for tags outside the closed set
    pub fn from_tag(tag: i64) -> Option<Self> {
        let ty = match tag {
            0 => ValueType::Unknown,
            1 => ValueType::Null,
            2 => ValueType::String,
            3 => ValueType::Integer,
            4 => ValueType::Boolean,
            5 => ValueType::Double,
            6 => ValueType::Array,
            7 => ValueType::Edge,
            8 => ValueType::Node,
            9 => ValueType::Path,
            10 => ValueType::Map,
            11 => ValueType::Point,
            _ => return None,
        };
        Some(ty)
    }

    pub fn tag(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueType::Unknown => "unknown",
            ValueType::Null => "null",
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
            ValueType::Double => "double",
            ValueType::Array => "array",
            ValueType::Edge => "edge",
            ValueType::Node => "node",
            ValueType::Path => "path",
            ValueType::Map => "map",
            ValueType::Point => "point",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded reply value
///
/// Closed over the value tags the server emits. Exactly one variant is active
/// and no variant coerces into another implicitly; see `conversion.rs` for the
/// explicit accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Map(IndexMap<String, Value>),
    Point(Point),
    Node(Box<Node>),
    Edge(Edge),
    Path(Path),
}

impl Value {
    /// Type tag of the active variant
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
            Value::Point(_) => ValueType::Point,
            Value::Node(_) => ValueType::Node,
            Value::Edge(_) => ValueType::Edge,
            Value::Path(_) => ValueType::Path,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value is a graph entity (node, edge or path)
    pub fn is_entity(&self) -> bool {
        matches!(self, Value::Node(_) | Value::Edge(_) | Value::Path(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Point(p) => write!(f, "{}", p),
            Value::Node(n) => write!(f, "{}", n),
            Value::Edge(e) => write!(f, "{}", e),
            Value::Path(p) => write!(f, "{}", p),
        }
    }
}
