use indexmap::IndexMap;
use std::sync::Arc;

use crate::core::error::{GraphResult, LookupError};
use crate::core::result::Header;
use crate::core::value::{Point, Value, ValueType};
use crate::core::vertex_edge_path::{Edge, Node, Path};

/// Anything a record column can be addressed by
pub trait ColumnKey {
    fn column_index(&self, header: &Header) -> Result<usize, LookupError>;
}

impl ColumnKey for usize {
    fn column_index(&self, header: &Header) -> Result<usize, LookupError> {
        if *self < header.len() {
            Ok(*self)
        } else {
            Err(LookupError::IndexOutOfRange {
                index: *self,
                len: header.len(),
            })
        }
    }
}

impl ColumnKey for &str {
    fn column_index(&self, header: &Header) -> Result<usize, LookupError> {
        header
            .index_of(self)
            .ok_or_else(|| LookupError::ColumnNotFound(self.to_string()))
    }
}

impl ColumnKey for String {
    fn column_index(&self, header: &Header) -> Result<usize, LookupError> {
        self.as_str().column_index(header)
    }
}

impl ColumnKey for &String {
    fn column_index(&self, header: &Header) -> Result<usize, LookupError> {
        self.as_str().column_index(header)
    }
}

/// One decoded row, positionally aligned with its header
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    header: Arc<Header>,
    values: Vec<Value>,
}

impl Record {
    /// Callers guarantee `values.len() == header.len()`
    pub(crate) fn new(header: Arc<Header>, values: Vec<Value>) -> Self {
        debug_assert_eq!(header.len(), values.len());
        Self { header, values }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Value by column name (first match) or position
    pub fn get<K: ColumnKey>(&self, key: K) -> GraphResult<&Value> {
        let index = key.column_index(&self.header)?;
        Ok(&self.values[index])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.header.names()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.header.names().zip(self.values.iter())
    }

    /// Column name to value; the first of several same-named columns wins
    pub fn object(&self) -> IndexMap<String, Value> {
        let mut map = IndexMap::with_capacity(self.values.len());
        for (name, value) in self.entries() {
            if !map.contains_key(name) {
                map.insert(name.to_string(), value.clone());
            }
        }
        map
    }

    pub fn includes_key(&self, name: &str) -> bool {
        self.header.index_of(name).is_some()
    }

    pub fn includes_value(&self, value: &Value) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_str<K: ColumnKey>(&self, key: K) -> GraphResult<&str> {
        let value = self.get(key)?;
        Ok(value
            .as_str()
            .ok_or_else(|| value.mismatch(ValueType::String))?)
    }

    pub fn get_int<K: ColumnKey>(&self, key: K) -> GraphResult<i64> {
        let value = self.get(key)?;
        Ok(value
            .as_int()
            .ok_or_else(|| value.mismatch(ValueType::Integer))?)
    }

    /// Doubles, with integers widened
    pub fn get_float<K: ColumnKey>(&self, key: K) -> GraphResult<f64> {
        let value = self.get(key)?;
        match value {
            Value::Double(d) => Ok(*d),
            Value::Integer(i) => Ok(*i as f64),
            other => Err(other.mismatch(ValueType::Double).into()),
        }
    }

    pub fn get_bool<K: ColumnKey>(&self, key: K) -> GraphResult<bool> {
        let value = self.get(key)?;
        Ok(value
            .as_bool()
            .ok_or_else(|| value.mismatch(ValueType::Boolean))?)
    }

    pub fn get_point<K: ColumnKey>(&self, key: K) -> GraphResult<&Point> {
        let value = self.get(key)?;
        Ok(value
            .as_point()
            .ok_or_else(|| value.mismatch(ValueType::Point))?)
    }

    pub fn get_node<K: ColumnKey>(&self, key: K) -> GraphResult<&Node> {
        let value = self.get(key)?;
        Ok(value
            .as_node()
            .ok_or_else(|| value.mismatch(ValueType::Node))?)
    }

    pub fn get_edge<K: ColumnKey>(&self, key: K) -> GraphResult<&Edge> {
        let value = self.get(key)?;
        Ok(value
            .as_edge()
            .ok_or_else(|| value.mismatch(ValueType::Edge))?)
    }

    pub fn get_path<K: ColumnKey>(&self, key: K) -> GraphResult<&Path> {
        let value = self.get(key)?;
        Ok(value
            .as_path()
            .ok_or_else(|| value.mismatch(ValueType::Path))?)
    }

    /// JSON object keyed like [`Record::object`]
    pub fn to_json(&self) -> GraphResult<serde_json::Value> {
        Ok(serde_json::to_value(self.object())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GraphError;
    use crate::core::result::{Column, ColumnType};
    use serde_json::json;

    fn record() -> Record {
        let header = Arc::new(Header::new(vec![
            Column::new(ColumnType::Scalar, "name"),
            Column::new(ColumnType::Scalar, "age"),
            Column::new(ColumnType::Scalar, "name"),
        ]));
        Record::new(
            header,
            vec![Value::from("roi"), Value::Integer(32), Value::from("shadow")],
        )
    }

    #[test]
    fn test_get_by_name_and_index() {
        let r = record();
        assert_eq!(r.get("name").ok(), Some(&Value::from("roi")));
        assert_eq!(r.get(2).ok(), Some(&Value::from("shadow")));
        assert_eq!(r.get(String::from("age")).ok(), Some(&Value::Integer(32)));
        assert!(matches!(
            r.get(3).unwrap_err(),
            GraphError::Lookup(LookupError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            r.get("missing").unwrap_err(),
            GraphError::Lookup(LookupError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_views() {
        let r = record();
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["name", "age", "name"]);
        assert_eq!(r.len(), 3);
        assert!(r.includes_key("age"));
        assert!(!r.includes_key("city"));
        assert!(r.includes_value(&Value::Integer(32)));
        assert!(!r.includes_value(&Value::Integer(33)));
        assert_eq!(r.entries().nth(1), Some(("age", &Value::Integer(32))));
    }

    #[test]
    fn test_object_first_column_wins() {
        let r = record();
        let obj = r.object();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("name"), Some(&Value::from("roi")));
        assert_eq!(obj, r.object());
        assert_eq!(r.to_json().expect("json"), json!({"name": "roi", "age": 32}));
    }

    #[test]
    fn test_typed_getters() {
        let r = record();
        assert_eq!(r.get_str("name").ok(), Some("roi"));
        assert_eq!(r.get_int("age").ok(), Some(32));
        assert_eq!(r.get_float("age").ok(), Some(32.0));
        assert!(matches!(
            r.get_int("name").unwrap_err(),
            GraphError::Lookup(LookupError::TypeMismatch {
                expected: ValueType::Integer,
                actual: ValueType::String,
            })
        ));
        assert!(r.get_node(0).is_err());
    }
}
