use crate::utils::constants::{CLEAN_DATA_FILE, CLEAN_DIR, RAW_DATA_FILE, RAW_DIR, REPORT_SUFFIX};
use std::path::{Path, PathBuf};

/// Default location of the raw extract: data/raw/raw_disasters.csv
pub fn default_raw_path() -> PathBuf {
    PathBuf::from(RAW_DIR).join(RAW_DATA_FILE)
}

/// Default location of the cleaned dataset: data/clean/emdat_cleaned.csv
pub fn default_clean_path() -> PathBuf {
    PathBuf::from(CLEAN_DIR).join(CLEAN_DATA_FILE)
}

/// Parquet copy written next to a cleaned CSV (same stem, .parquet)
pub fn parquet_path_for(csv_path: &Path) -> PathBuf {
    csv_path.with_extension("parquet")
}

/// Cleaning report written next to a cleaned CSV: <stem>.report.json
pub fn report_path_for(csv_path: &Path) -> PathBuf {
    let stem = csv_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "emdat_cleaned".to_string());
    csv_path.with_file_name(format!("{}.{}", stem, REPORT_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let clean = default_clean_path();
        let clean_str = clean.to_string_lossy();
        assert!(clean_str.starts_with("data/clean/"));
        assert!(clean_str.ends_with(".csv"));

        let raw = default_raw_path();
        assert!(raw.to_string_lossy().starts_with("data/raw/"));
    }

    #[test]
    fn test_sidecar_paths() {
        let csv = Path::new("out/emdat_cleaned.csv");
        assert_eq!(parquet_path_for(csv), PathBuf::from("out/emdat_cleaned.parquet"));
        assert_eq!(
            report_path_for(csv),
            PathBuf::from("out/emdat_cleaned.report.json")
        );
    }
}
