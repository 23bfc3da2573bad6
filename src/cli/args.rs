use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emdat-processor")]
#[command(about = "Clean and summarize EM-DAT disaster records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: ./emdat.toml if present]")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean the raw extract, or load the cached cleaned dataset
    Clean {
        #[arg(short, long, help = "Raw CSV extract [default: data/raw/raw_disasters.csv]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Cleaned CSV path [default: data/clean/emdat_cleaned.csv]")]
        output: Option<PathBuf>,

        #[arg(long, help = "Re-clean even if the cleaned file exists")]
        force_clean: bool,

        #[arg(long, help = "Refresh the raw extract before cleaning")]
        force_scrape: bool,

        #[arg(long, help = "Also write a Parquet copy next to the cleaned CSV")]
        parquet: bool,

        #[arg(short, long, help = "Parquet compression: snappy, gzip, lz4, zstd, none")]
        compression: Option<String>,

        #[arg(long, help = "Write the cleaning report as JSON next to the cleaned CSV")]
        report: bool,
    },

    /// Check that a raw extract carries the mandatory columns
    Validate {
        #[arg(short, long, help = "Raw CSV extract [default: data/raw/raw_disasters.csv]")]
        input: Option<PathBuf>,
    },

    /// Display a summary of a cleaned dataset
    Info {
        #[arg(short, long, help = "Cleaned CSV [default: data/clean/emdat_cleaned.csv]")]
        file: Option<PathBuf>,

        #[arg(short, long, default_value = "5")]
        sample: usize,
    },
}
