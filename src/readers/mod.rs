pub mod table_reader;

pub use table_reader::{cleaned_column_type, TableReader};
