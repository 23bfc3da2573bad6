pub mod constants;
pub mod countries;
pub mod filename;
pub mod headers;
pub mod numeric;
pub mod progress;

pub use constants::*;
pub use countries::country_name;
pub use filename::{default_clean_path, default_raw_path, parquet_path_for, report_path_for};
pub use headers::{canonical_column_name, canonicalize_headers};
pub use numeric::{parse_integer, parse_number};
pub use progress::ProgressReporter;
