use serde::Serialize;
use std::fmt;

/// Declared column type, advisory only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnType {
    Unknown = 0,
    Scalar = 1,
    Node = 2,
    Relation = 3,
}

impl ColumnType {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ColumnType::Scalar,
            2 => ColumnType::Node,
            3 => ColumnType::Relation,
            _ => ColumnType::Unknown,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "scalar" => ColumnType::Scalar,
            "node" => ColumnType::Node,
            "relation" | "relationship" => ColumnType::Relation,
            _ => ColumnType::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Unknown => "unknown",
            ColumnType::Scalar => "scalar",
            ColumnType::Node => "node",
            ColumnType::Relation => "relation",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub column_type: ColumnType,
    pub name: String,
}

impl Column {
    pub fn new(column_type: ColumnType, name: impl Into<String>) -> Self {
        Self {
            column_type,
            name: name.into(),
        }
    }
}

/// Ordered column descriptors of a result
///
/// Duplicate names are allowed; lookups by name resolve to the first match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    columns: Vec<Column>,
}

impl Header {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of the first column called `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_codes() {
        assert_eq!(ColumnType::from_code(1), ColumnType::Scalar);
        assert_eq!(ColumnType::from_code(3), ColumnType::Relation);
        assert_eq!(ColumnType::from_code(99), ColumnType::Unknown);
        assert_eq!(ColumnType::from_name("Node"), ColumnType::Node);
        assert_eq!(ColumnType::from_name("whatever"), ColumnType::Unknown);
    }

    #[test]
    fn test_duplicate_names_resolve_to_first() {
        let header = Header::new(vec![
            Column::new(ColumnType::Scalar, "a"),
            Column::new(ColumnType::Node, "n"),
            Column::new(ColumnType::Scalar, "a"),
        ]);
        assert_eq!(header.index_of("a"), Some(0));
        assert_eq!(header.index_of("n"), Some(1));
        assert_eq!(header.index_of("missing"), None);
        assert_eq!(header.names().collect::<Vec<_>>(), vec!["a", "n", "a"]);
    }
}
