pub mod formatter;

pub use formatter::{format_csv, format_csv_line, format_timestamp, CSV_HEADER};
