use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::cache::SchemaResolver;
use crate::core::codec::{Reply, ValueDecoder};
use crate::core::error::{GraphResult, LookupError};
use crate::core::result::{Header, Record, Statistics};

/// A row as received, decoded into a [`Record`] the first time it is read
#[derive(Debug)]
struct RawRow {
    cells: Vec<Reply>,
    record: OnceLock<Record>,
}

/// Result of one query
///
/// Rows are kept undecoded until first access. The cursor (`has_next` /
/// `next`) is forward-only; [`ResultSet::reopen`] gives a fresh cursor over the
/// same rows without decoding them again.
pub struct ResultSet {
    header: Arc<Header>,
    rows: Arc<[RawRow]>,
    statistics: Arc<Statistics>,
    schema: Arc<dyn SchemaResolver>,
    cursor: usize,
}

impl ResultSet {
    /// Row lengths must already be checked against the header
    pub(crate) fn new(
        header: Header,
        rows: Vec<Vec<Reply>>,
        statistics: Statistics,
        schema: Arc<dyn SchemaResolver>,
    ) -> Self {
        let rows: Vec<RawRow> = rows
            .into_iter()
            .map(|cells| RawRow {
                cells,
                record: OnceLock::new(),
            })
            .collect();
        Self {
            header: Arc::new(header),
            rows: rows.into(),
            statistics: Arc::new(statistics),
            schema,
            cursor: 0,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Total number of rows, independent of the cursor
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.rows.len()
    }

    /// Advance the cursor and return the record under it
    ///
    /// Fails with [`LookupError::NoMoreRecords`] once the rows are exhausted.
    /// A row that fails to decode still counts as consumed.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> GraphResult<&Record> {
        if !self.has_next() {
            return Err(LookupError::NoMoreRecords.into());
        }
        let index = self.cursor;
        self.cursor += 1;
        self.materialize(index)
    }

    /// Random access, memoized like the cursor
    pub fn record(&self, index: usize) -> GraphResult<&Record> {
        if index >= self.rows.len() {
            return Err(LookupError::RecordOutOfRange {
                index,
                len: self.rows.len(),
            }
            .into());
        }
        self.materialize(index)
    }

    /// A new cursor positioned at the first row, sharing decoded records
    pub fn reopen(&self) -> ResultSet {
        ResultSet {
            header: Arc::clone(&self.header),
            rows: Arc::clone(&self.rows),
            statistics: Arc::clone(&self.statistics),
            schema: Arc::clone(&self.schema),
            cursor: 0,
        }
    }

    /// Owned records from the cursor position onward
    pub fn records(&mut self) -> Records<'_> {
        Records {
            result_set: self,
            failed: false,
        }
    }

    fn materialize(&self, index: usize) -> GraphResult<&Record> {
        let row = &self.rows[index];
        if let Some(record) = row.record.get() {
            return Ok(record);
        }

        let decoder = ValueDecoder::new(self.schema.as_ref());
        let values = row
            .cells
            .iter()
            .map(|cell| decoder.decode(cell))
            .collect::<GraphResult<Vec<_>>>()?;
        let record = Record::new(Arc::clone(&self.header), values);
        // 并发解码同一行时只保留先写入的结果
        Ok(row.record.get_or_init(|| record))
    }
}

impl fmt::Debug for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSet")
            .field("header", &self.header)
            .field("rows", &self.rows.len())
            .field("cursor", &self.cursor)
            .field("statistics", &self.statistics)
            .finish()
    }
}

/// Iterator over the remaining records of a [`ResultSet`]
///
/// Stops after yielding the first error.
pub struct Records<'a> {
    result_set: &'a mut ResultSet,
    failed: bool,
}

impl Iterator for Records<'_> {
    type Item = GraphResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.result_set.has_next() {
            return None;
        }
        let item = self.result_set.next().cloned();
        self.failed = item.is_err();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.result_set.len() - self.result_set.cursor;
        (0, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NoSchema;
    use crate::core::error::GraphError;
    use crate::core::result::{Column, ColumnType};
    use crate::core::value::Value;
    use serde_json::json;

    fn cells(json: serde_json::Value) -> Vec<Reply> {
        match Reply::try_from(json).expect("fixture is a valid reply") {
            Reply::Array(items) => items,
            other => vec![other],
        }
    }

    fn result_set(rows: Vec<Vec<Reply>>) -> ResultSet {
        let header = Header::new(vec![
            Column::new(ColumnType::Scalar, "a"),
            Column::new(ColumnType::Scalar, "b"),
        ]);
        ResultSet::new(header, rows, Statistics::default(), Arc::new(NoSchema))
    }

    #[test]
    fn test_cursor_exhaustion() {
        let mut rs = result_set(vec![cells(json!([[3, 1], [2, "x"]]))]);
        assert!(rs.has_next());
        assert_eq!(rs.next().expect("row").get("b").ok(), Some(&Value::from("x")));
        assert!(!rs.has_next());
        assert!(matches!(
            rs.next().unwrap_err(),
            GraphError::Lookup(LookupError::NoMoreRecords)
        ));
        // still exhausted
        assert!(rs.next().is_err());
    }

    #[test]
    fn test_reopen_and_random_access() {
        let mut rs = result_set(vec![
            cells(json!([[3, 1], [2, "x"]])),
            cells(json!([[3, 2], [2, "y"]])),
        ]);
        while rs.has_next() {
            rs.next().expect("row");
        }

        let mut again = rs.reopen();
        assert_eq!(again.next().expect("row").get_int("a").ok(), Some(1));
        assert_eq!(rs.record(1).expect("row").get_str("b").ok(), Some("y"));
        assert!(matches!(
            rs.record(2).unwrap_err(),
            GraphError::Lookup(LookupError::RecordOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(again.len(), 2);
    }

    #[test]
    fn test_records_stop_after_error() {
        let mut rs = result_set(vec![
            cells(json!([[3, 1], [2, "x"]])),
            cells(json!([[42, 1], [2, "y"]])),
            cells(json!([[3, 3], [2, "z"]])),
        ]);
        let items: Vec<_> = rs.records().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].as_ref().is_err_and(|e| e.is_decode()));
    }
}
