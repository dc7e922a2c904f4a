//! Query results
//!
//! `ResultSet` is what a caller gets back from a query. It owns the decoded
//! `Header`, the raw rows (decoded into `Record`s on first access) and the
//! parsed `Statistics`.

pub mod header;
pub mod record;
pub mod result_set;
pub mod statistics;

pub use header::{Column, ColumnType, Header};
pub use record::{ColumnKey, Record};
pub use result_set::{Records, ResultSet};
pub use statistics::{Statistic, Statistics};
