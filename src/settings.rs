use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use crate::error::Result;
use crate::utils::constants::{
    CLEAN_DATA_FILE, CLEAN_DIR, COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE,
    COMPRESSION_SNAPPY, COMPRESSION_ZSTD, DEFAULT_DELIMITER, RAW_DATA_FILE, RAW_DIR,
};

/// Base name of the optional settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "emdat";
pub const ENV_PREFIX: &str = "EMDAT";

/// Runtime settings: built-in defaults, then `emdat.toml` (or an explicit
/// file), then `EMDAT_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub raw_dir: String,
    #[validate(length(min = 1))]
    pub raw_file: String,
    #[validate(length(min = 1))]
    pub clean_dir: String,
    #[validate(length(min = 1))]
    pub clean_file: String,
    #[validate(custom(function = "validate_delimiter"))]
    pub delimiter: String,
    pub write_parquet: bool,
    #[validate(custom(function = "validate_compression"))]
    pub compression: String,
    pub write_report: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            raw_dir: RAW_DIR.into(),
            raw_file: RAW_DATA_FILE.into(),
            clean_dir: CLEAN_DIR.into(),
            clean_file: CLEAN_DATA_FILE.into(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            write_parquet: false,
            compression: COMPRESSION_SNAPPY.into(),
            write_report: false,
        }
    }
}

impl Settings {
    /// Load and validate. An explicit `path` must exist; the default
    /// `emdat.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(SETTINGS_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("raw_dir", defaults.raw_dir)?
            .set_default("raw_file", defaults.raw_file)?
            .set_default("clean_dir", defaults.clean_dir)?
            .set_default("clean_file", defaults.clean_file)?
            .set_default("delimiter", defaults.delimiter)?
            .set_default("write_parquet", defaults.write_parquet)?
            .set_default("compression", defaults.compression)?
            .set_default("write_report", defaults.write_report)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn raw_path(&self) -> PathBuf {
        Path::new(&self.raw_dir).join(&self.raw_file)
    }

    pub fn clean_path(&self) -> PathBuf {
        Path::new(&self.clean_dir).join(&self.clean_file)
    }

    /// The validated delimiter as the byte the csv crate expects.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.bytes().next().unwrap_or(b',')
    }
}

fn validate_delimiter(value: &str) -> std::result::Result<(), ValidationError> {
    if value.len() == 1 && value.is_ascii() {
        Ok(())
    } else {
        Err(ValidationError::new("delimiter_not_single_byte"))
    }
}

fn validate_compression(value: &str) -> std::result::Result<(), ValidationError> {
    let known = [
        COMPRESSION_SNAPPY,
        COMPRESSION_GZIP,
        COMPRESSION_LZ4,
        COMPRESSION_ZSTD,
        COMPRESSION_NONE,
    ];
    if known.contains(&value.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_compression"))
    }
}
