use crate::analyzers::SummaryAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::dataset::{DatasetLoader, LoadOptions};
use crate::error::Result;
use crate::models::frame::is_empty;
use crate::processors::CleaningPipeline;
use crate::readers::TableReader;
use crate::settings::Settings;
use crate::utils::filename::parquet_path_for;
use crate::utils::progress::ProgressReporter;
use crate::writers::ParquetWriter;
use arrow::util::pretty::pretty_format_batches;
use tracing::error;

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Clean {
            input,
            output,
            force_clean,
            force_scrape,
            parquet,
            compression,
            report,
        } => {
            let raw_path = input.unwrap_or_else(|| settings.raw_path());
            let clean_path = output.unwrap_or_else(|| settings.clean_path());
            let compression = compression.unwrap_or_else(|| settings.compression.clone());
            let write_parquet = parquet || settings.write_parquet;

            println!("Input file: {}", raw_path.display());
            println!("Output file: {}", clean_path.display());

            let reader = TableReader::with_delimiter(settings.delimiter_byte() as char)?;
            let loader = DatasetLoader::new(raw_path, clean_path)
                .with_reader(reader)
                .with_parquet(write_parquet, &compression)
                .with_report(report || settings.write_report)
                .with_progress(true);

            let loaded = loader.load(LoadOptions {
                force_clean,
                force_scrape,
            })?;

            match loaded.report() {
                Some(report) => {
                    println!("\n{}", report.summary());
                    if write_parquet {
                        let info = ParquetWriter::new()
                            .with_compression(&compression)?
                            .get_file_info(&parquet_path_for(loader.clean_path()))?;
                        println!("\n{}", info.summary());
                    }
                }
                None => println!(
                    "Loaded cached dataset: {} records, {} columns (use --force-clean to rebuild)",
                    loaded.batch.num_rows(),
                    loaded.batch.num_columns()
                ),
            }
        }

        Commands::Validate { input } => {
            let raw_path = input.unwrap_or_else(|| settings.raw_path());
            println!("Validating {}", raw_path.display());

            let progress = ProgressReporter::new_spinner("Reading raw data...", false);
            let raw = TableReader::with_delimiter(settings.delimiter_byte() as char)?
                .read_raw(&raw_path)?;
            progress.finish_with_message(&format!("Read {} records", raw.num_rows()));

            let pipeline = CleaningPipeline::new();
            match pipeline.check_schema(&raw) {
                Ok(()) => println!(
                    "✅ All {} mandatory columns present",
                    pipeline.validator().required().len()
                ),
                Err(e) => {
                    if let Some(missing) = e.missing_columns() {
                        println!("❌ Missing mandatory columns: {}", missing.join(", "));
                    } else {
                        error!("Validation failed: {}", e);
                    }
                    return Err(e);
                }
            }
        }

        Commands::Info { file, sample } => {
            let file = file.unwrap_or_else(|| settings.clean_path());
            println!("Analyzing cleaned dataset: {}", file.display());

            let batch = TableReader::new().read_cleaned(&file)?;
            let summary = SummaryAnalyzer::new().analyze(&batch);
            println!("\n{}", summary.summary());

            if sample > 0 && !is_empty(&batch) {
                let shown = sample.min(batch.num_rows());
                println!("\nSample Records (showing {} records):", shown);
                println!("{}", pretty_format_batches(&[batch.slice(0, shown)])?);
            }
        }
    }

    Ok(())
}
