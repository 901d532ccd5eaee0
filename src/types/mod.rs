mod column;
mod row;
mod sql_value;

pub use column::ColumnMeta;
pub use row::{FetchedRow, QueryResult, Row};
pub use sql_value::{FieldType, SqlValue};
