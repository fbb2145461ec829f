//! Table internals of the related list.

mod cells;
mod columns;
mod header;
mod row;

pub use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
pub use header::render_table_header;
pub use row::render_opportunity_row;
