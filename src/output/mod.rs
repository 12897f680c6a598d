//! Output module: table rendering, CSV encoding and persistence.

pub mod sink;
pub mod table_writer;

pub use sink::{CsvFileSink, OutputDirectory, OutputSink};
pub use table_writer::{
    build_table, composite_cell, global_table, parse_composite_cell, per_column_table,
    to_csv_bytes, to_csv_string,
};
