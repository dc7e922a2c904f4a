//! ResponseDecoder - top-level reply classification
//!
//! ```text
//! [statistics]                      write-only query, no projection
//! [header, rows, statistics]        query with projected columns
//! ```
//!
//! The header and statistics are decoded eagerly. Rows are only length-checked
//! and handed to the [`ResultSet`], which decodes each one on first access.

use std::sync::Arc;

use log::trace;

use crate::cache::SchemaResolver;
use crate::core::codec::value_decoder::parse_integer;
use crate::core::codec::Reply;
use crate::core::error::{DecodeError, GraphError, GraphResult};
use crate::core::result::{Column, ColumnType, Header, ResultSet, Statistics};

pub struct ResponseDecoder {
    schema: Arc<dyn SchemaResolver>,
}

impl ResponseDecoder {
    pub fn new(schema: Arc<dyn SchemaResolver>) -> Self {
        Self { schema }
    }

    pub fn decode(&self, reply: Reply) -> GraphResult<ResultSet> {
        let sections = match reply {
            Reply::Error(message) => return Err(GraphError::Server(message)),
            Reply::Array(sections) => sections,
            other => return Err(DecodeError::unexpected("query reply", &other).into()),
        };
        // 执行期错误附在回复末尾
        if let Some(Reply::Error(message)) = sections.last() {
            return Err(GraphError::Server(message.clone()));
        }

        match <[Reply; 3]>::try_from(sections) {
            Ok([header, rows, stats]) => {
                let header = decode_header(&header)?;
                let rows = split_rows(&header, rows)?;
                let statistics = decode_statistics(&stats)?;
                trace!(
                    "decoded reply: {} columns, {} rows, {} statistics",
                    header.len(),
                    rows.len(),
                    statistics.len()
                );
                Ok(ResultSet::new(header, rows, statistics, Arc::clone(&self.schema)))
            }
            Err(sections) => match <[Reply; 1]>::try_from(sections) {
                Ok([stats]) => {
                    let statistics = decode_statistics(&stats)?;
                    Ok(ResultSet::new(
                        Header::default(),
                        Vec::new(),
                        statistics,
                        Arc::clone(&self.schema),
                    ))
                }
                Err(sections) => Err(DecodeError::unexpected(
                    "query reply with 1 or 3 sections",
                    &Reply::Array(sections),
                )
                .into()),
            },
        }
    }
}

/// `[[columnType, name], ...]`, type given as a code or a name
pub fn decode_header(reply: &Reply) -> Result<Header, DecodeError> {
    let cells = reply
        .as_array()
        .ok_or_else(|| DecodeError::malformed("header", "sequence of columns", reply))?;

    let mut columns = Vec::with_capacity(cells.len());
    for cell in cells {
        let Some([ty, Reply::String(name)]) = cell.as_array() else {
            return Err(DecodeError::malformed("header column", "[type, name]", cell));
        };
        let column_type = match ty {
            Reply::String(ty) => ColumnType::from_name(ty),
            other => ColumnType::from_code(parse_integer("column type", other)?),
        };
        columns.push(Column::new(column_type, name.clone()));
    }
    Ok(Header::new(columns))
}

fn split_rows(header: &Header, rows: Reply) -> Result<Vec<Vec<Reply>>, DecodeError> {
    let rows = match rows {
        Reply::Array(rows) => rows,
        other => return Err(DecodeError::malformed("records", "sequence of rows", &other)),
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Reply::Array(cells) if cells.len() == header.len() => Ok(cells),
            Reply::Array(cells) => Err(DecodeError::RowLength {
                row: index,
                expected: header.len(),
                actual: cells.len(),
            }),
            other => Err(DecodeError::malformed("record", "sequence of cells", &other)),
        })
        .collect()
}

fn decode_statistics(reply: &Reply) -> Result<Statistics, DecodeError> {
    let entries = reply
        .as_array()
        .ok_or_else(|| DecodeError::malformed("statistics", "sequence of strings", reply))?;
    let lines = entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .ok_or_else(|| DecodeError::malformed("statistics entry", "string", entry))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Statistics::parse(lines))
}
