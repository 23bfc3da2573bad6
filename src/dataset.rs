//! Cached access to the cleaned dataset.
//!
//! The cleaned CSV doubles as the cache: when it exists it is loaded as-is,
//! otherwise the raw extract is cleaned and persisted first. The cache key is
//! the file's existence only, so a newer raw file is not detected; use
//! `force_clean` to rebuild.

use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::processors::{CleaningPipeline, CleaningReport};
use crate::readers::TableReader;
use crate::settings::Settings;
use crate::utils::constants::COMPRESSION_SNAPPY;
use crate::utils::filename::{parquet_path_for, report_path_for};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvTableWriter, ParquetWriter};
use tracing::{error, info, warn};

/// Refreshes the raw extract from its upstream source.
pub trait SourceFetcher {
    fn fetch(&self, destination: &Path) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Re-clean even if a cleaned file exists.
    pub force_clean: bool,
    /// Refresh the raw file first. Implies `force_clean`.
    pub force_scrape: bool,
}

#[derive(Debug, Clone)]
pub enum DatasetOrigin {
    /// Loaded from an existing cleaned file.
    Cache,
    /// Cleaned during this call.
    Cleaned(CleaningReport),
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub batch: RecordBatch,
    pub origin: DatasetOrigin,
}

impl LoadedDataset {
    pub fn report(&self) -> Option<&CleaningReport> {
        match &self.origin {
            DatasetOrigin::Cleaned(report) => Some(report),
            DatasetOrigin::Cache => None,
        }
    }

    pub fn from_cache(&self) -> bool {
        matches!(self.origin, DatasetOrigin::Cache)
    }
}

pub struct DatasetLoader {
    raw_path: PathBuf,
    clean_path: PathBuf,
    reader: TableReader,
    pipeline: CleaningPipeline,
    fetcher: Option<Box<dyn SourceFetcher>>,
    write_parquet: bool,
    compression: String,
    write_report: bool,
    show_progress: bool,
}

impl DatasetLoader {
    pub fn new(raw_path: impl Into<PathBuf>, clean_path: impl Into<PathBuf>) -> Self {
        Self {
            raw_path: raw_path.into(),
            clean_path: clean_path.into(),
            reader: TableReader::new(),
            pipeline: CleaningPipeline::new(),
            fetcher: None,
            write_parquet: false,
            compression: COMPRESSION_SNAPPY.to_string(),
            write_report: false,
            show_progress: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let reader = TableReader::with_delimiter(settings.delimiter_byte() as char)?;
        Ok(Self {
            reader,
            write_parquet: settings.write_parquet,
            compression: settings.compression.clone(),
            write_report: settings.write_report,
            ..Self::new(settings.raw_path(), settings.clean_path())
        })
    }

    pub fn with_fetcher(mut self, fetcher: Box<dyn SourceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_reader(mut self, reader: TableReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_parquet(mut self, enabled: bool, compression: &str) -> Self {
        self.write_parquet = enabled;
        self.compression = compression.to_string();
        self
    }

    pub fn with_report(mut self, enabled: bool) -> Self {
        self.write_report = enabled;
        self
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    pub fn clean_path(&self) -> &Path {
        &self.clean_path
    }

    pub fn load(&self, options: LoadOptions) -> Result<LoadedDataset> {
        if options.force_scrape {
            self.refresh_source()?;
        }

        let refresh = options.force_clean || options.force_scrape;
        if !refresh && self.clean_path.exists() {
            info!("Loading cleaned dataset from {}", self.clean_path.display());
            // the cleaned file is always comma-delimited
            let batch = TableReader::new().read_cleaned(&self.clean_path)?;
            return Ok(LoadedDataset {
                batch,
                origin: DatasetOrigin::Cache,
            });
        }

        let (batch, report) = self.clean_and_persist().map_err(|e| {
            error!("Failed to build cleaned dataset: {}", e);
            e
        })?;

        Ok(LoadedDataset {
            batch,
            origin: DatasetOrigin::Cleaned(report),
        })
    }

    fn refresh_source(&self) -> Result<()> {
        match &self.fetcher {
            Some(fetcher) => {
                info!("Refreshing raw data into {}", self.raw_path.display());
                fetcher.fetch(&self.raw_path)
            }
            None => {
                warn!(
                    "No source fetcher configured; using existing raw file {}",
                    self.raw_path.display()
                );
                Ok(())
            }
        }
    }

    fn clean_and_persist(&self) -> Result<(RecordBatch, CleaningReport)> {
        info!("Cleaning raw data from {}", self.raw_path.display());
        let raw = self.reader.read_raw(&self.raw_path)?;

        let progress = ProgressReporter::new_stages(
            self.pipeline.stage_names().len() as u64,
            "Cleaning disaster records",
            !self.show_progress,
        );
        let cleaned = self.pipeline.run_with_progress(&raw, Some(&progress))?;
        progress.finish_with_message("Cleaning complete");

        CsvTableWriter::new().write_batch(&cleaned.batch, &self.clean_path)?;

        if self.write_parquet {
            let parquet_path = parquet_path_for(&self.clean_path);
            ParquetWriter::new()
                .with_compression(&self.compression)?
                .write_batch(&cleaned.batch, &parquet_path)?;
        }

        if self.write_report {
            let report_path = report_path_for(&self.clean_path);
            cleaned.report.write_json(&report_path)?;
            info!("Wrote cleaning report to {}", report_path.display());
        }

        Ok((cleaned.batch, cleaned.report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    const RAW: &str = "DisNo.,Disaster Group,ISO,Country,Start Year,Start Month,Start Day,Total Deaths\n\
2010-0017-HTI,Natural,HTI,Haiti,2010,1,12,222570\n";

    fn setup() -> (TempDir, DatasetLoader) {
        let dir = TempDir::new().unwrap();
        let raw = dir.path().join("raw/raw_disasters.csv");
        std::fs::create_dir_all(raw.parent().unwrap()).unwrap();
        std::fs::write(&raw, RAW).unwrap();
        let loader = DatasetLoader::new(raw, dir.path().join("clean/emdat_cleaned.csv"));
        (dir, loader)
    }

    struct CountingFetcher(Rc<Cell<usize>>);

    impl SourceFetcher for CountingFetcher {
        fn fetch(&self, destination: &Path) -> Result<()> {
            self.0.set(self.0.get() + 1);
            std::fs::write(destination, RAW)?;
            Ok(())
        }
    }

    #[test]
    fn test_cleans_then_uses_cache() -> Result<()> {
        let (_dir, loader) = setup();

        let first = loader.load(LoadOptions::default())?;
        assert!(!first.from_cache());
        assert!(loader.clean_path().exists());
        assert_eq!(first.report().map(|r| r.input_rows), Some(1));

        let second = loader.load(LoadOptions::default())?;
        assert!(second.from_cache());
        assert_eq!(second.batch.num_rows(), 1);
        Ok(())
    }

    #[test]
    fn test_force_clean_rebuilds() -> Result<()> {
        let (_dir, loader) = setup();
        loader.load(LoadOptions::default())?;

        let again = loader.load(LoadOptions {
            force_clean: true,
            ..Default::default()
        })?;
        assert!(!again.from_cache());
        Ok(())
    }

    #[test]
    fn test_force_scrape_uses_fetcher_and_recleans() -> Result<()> {
        let (_dir, loader) = setup();
        let calls = Rc::new(Cell::new(0));
        let loader = loader.with_fetcher(Box::new(CountingFetcher(calls.clone())));
        loader.load(LoadOptions::default())?;

        let loaded = loader.load(LoadOptions {
            force_scrape: true,
            ..Default::default()
        })?;
        assert_eq!(calls.get(), 1);
        assert!(!loaded.from_cache());
        Ok(())
    }

    #[test]
    fn test_force_scrape_without_fetcher_uses_raw() -> Result<()> {
        let (_dir, loader) = setup();
        let loaded = loader.load(LoadOptions {
            force_scrape: true,
            ..Default::default()
        })?;
        assert!(!loaded.from_cache());
        Ok(())
    }

    #[test]
    fn test_sidecar_outputs() -> Result<()> {
        let (_dir, loader) = setup();
        let loader = loader.with_parquet(true, "zstd").with_report(true);
        loader.load(LoadOptions::default())?;

        assert!(parquet_path_for(loader.clean_path()).exists());
        let report = std::fs::read_to_string(report_path_for(loader.clean_path()))?;
        let report: CleaningReport = serde_json::from_str(&report)?;
        assert_eq!(report.output_rows, 1);
        Ok(())
    }

    #[test]
    fn test_from_settings() -> Result<()> {
        let dir = TempDir::new()?;
        let raw_dir = dir.path().join("raw");
        std::fs::create_dir_all(&raw_dir)?;
        std::fs::write(raw_dir.join("extract.csv"), RAW.replace(',', ";"))?;

        let settings = Settings {
            raw_dir: raw_dir.to_string_lossy().into_owned(),
            raw_file: "extract.csv".into(),
            clean_dir: dir.path().join("clean").to_string_lossy().into_owned(),
            delimiter: ";".into(),
            write_report: true,
            ..Settings::default()
        };
        let loader = DatasetLoader::from_settings(&settings)?;
        let loaded = loader.load(LoadOptions::default())?;

        assert_eq!(loaded.batch.num_rows(), 1);
        assert!(report_path_for(loader.clean_path()).exists());
        // cleaned output is comma-delimited and reloads from cache
        assert!(loader.load(LoadOptions::default())?.from_cache());
        Ok(())
    }

    #[test]
    fn test_missing_raw_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let loader = DatasetLoader::new(dir.path().join("none.csv"), dir.path().join("out.csv"));
        let err = loader.load(LoadOptions::default()).unwrap_err();
        assert!(matches!(err, ProcessingError::Io(_)));
        assert!(!loader.clean_path().exists());
    }
}
