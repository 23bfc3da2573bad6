pub mod analyzers;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod utils;
pub mod writers;

pub use dataset::{DatasetLoader, LoadOptions, LoadedDataset, SourceFetcher};
pub use error::{ProcessingError, Result};
pub use processors::{CleanedDataset, CleaningPipeline, CleaningReport};
