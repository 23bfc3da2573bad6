use arrow::array::{Array, BooleanArray, Float64Array, Int64Array, StringArray};
use emdat_processor::analyzers::SummaryAnalyzer;
use emdat_processor::models::frame::{
    bool_column, date_column, float_column, has_column, int_column, text_column,
};
use emdat_processor::readers::TableReader;
use emdat_processor::utils::filename::report_path_for;
use emdat_processor::writers::ParquetWriter;
use emdat_processor::{CleaningPipeline, CleaningReport, DatasetLoader, LoadOptions};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

const RAW_EXTRACT: &str = "\
DisNo.,Historic,Classification Key,Disaster Group,Disaster Subgroup,Disaster Type,External IDs,ISO,Country,Region,Location,OFDA/BHA Response,Start Year,Start Month,Start Day,End Year,End Month,End Day,Total Deaths,No. Injured,Total Affected,Reconstruction Costs ('000 US$),Insured Damage ('000 US$),Total Damage ('000 US$),\"Total Damage, Adjusted ('000 US$)\",CPI,Entry Date,Last Update
2010-0017-HTI,No,nat-geo-ear-gro,Natural,Geophysical,Earthquake,,HTI,Haïti,Americas,Port-au-Prince,Yes,2010,1,12,2010,1,20,222570,300000,3700000,,,8000000,11000000,80.1,2010-01-13,2023-09-25
2008-0042-XXK,No,nat-hyd-flo-flo,Natural,Hydrological,Flood,GLIDE:FL-2008,XXK,Kosovo (UNSCR 1244),Europe,,No,2008,,,2008,,,,,1 200,,,N/A,,75.2,2008-03-01,2023-09-25
1990-0001-ZZZ,Yes,nat-met-sto-tro,Natural,Meteorological,Storm,,ZZZ,Atlantis,Oceania,,,1990,9,30,1990,9,2,12,,,,,\"1,500\",,60.0,1990-10-01,2023-09-25
";

fn write_raw(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("raw/raw_disasters.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, RAW_EXTRACT).unwrap();
    path
}

fn cleaned_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("clean/emdat_cleaned.csv")
}

fn read_report(clean_path: &Path) -> CleaningReport {
    let text = std::fs::read_to_string(report_path_for(clean_path)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_clean_persist_and_reload() {
    let dir = TempDir::new().unwrap();
    let loader = DatasetLoader::new(write_raw(&dir), cleaned_path(&dir))
        .with_report(true)
        .with_parquet(true, "snappy");

    let loaded = loader.load(LoadOptions::default()).unwrap();
    assert!(!loaded.from_cache());
    let batch = &loaded.batch;
    assert_eq!(batch.num_rows(), 3);

    assert_eq!(
        text_column(batch, "Country").unwrap(),
        &StringArray::from(vec![Some("Haiti"), Some("Kosovo"), None])
    );

    let starts = date_column(batch, "StartDate").unwrap();
    assert_eq!(starts.value_as_date(0), NaiveDate::from_ymd_opt(2010, 1, 12));
    assert_eq!(starts.value_as_date(1), NaiveDate::from_ymd_opt(2008, 1, 1));

    // negative duration passes through unchanged
    assert_eq!(
        int_column(batch, "DurationDays").unwrap(),
        &Int64Array::from(vec![Some(8), Some(0), Some(-28)])
    );
    assert_eq!(
        float_column(batch, "TotalDamage").unwrap(),
        &Float64Array::from(vec![Some(8_000_000.0), None, Some(1500.0)])
    );
    assert_eq!(
        float_column(batch, "TotalAffected").unwrap(),
        &Float64Array::from(vec![Some(3_700_000.0), Some(1200.0), None])
    );
    assert_eq!(
        bool_column(batch, "Historic").unwrap(),
        &BooleanArray::from(vec![Some(false), Some(false), Some(true)])
    );
    assert_eq!(
        bool_column(batch, "HasExternalIDs").unwrap(),
        &BooleanArray::from(vec![Some(false), Some(true), Some(false)])
    );

    for dropped in ["CPI", "ClassificationKey", "OFDABHAResponse", "ExternalIDs", "EntryDate"] {
        assert!(!has_column(batch, dropped), "{} should be pruned", dropped);
    }
    assert!(!has_column(batch, "Total Damage, Adjusted ('000 US$)"));

    let report = read_report(loader.clean_path());
    assert_eq!(report.input_rows, 3);
    assert_eq!(report.negative_durations(), 1);
    assert_eq!(
        report.unmapped_iso_codes().into_iter().collect::<Vec<_>>(),
        vec!["ZZZ".to_string()]
    );

    let info = ParquetWriter::new()
        .get_file_info(&loader.clean_path().with_extension("parquet"))
        .unwrap();
    assert_eq!(info.total_rows, 3);

    // reload from the persisted file matches what was returned
    let reloaded = TableReader::new().read_cleaned(loader.clean_path()).unwrap();
    assert_eq!(&reloaded, batch);
}

#[test]
fn test_cache_hit_and_force_clean() {
    let dir = TempDir::new().unwrap();
    let raw_path = write_raw(&dir);
    let loader = DatasetLoader::new(&raw_path, cleaned_path(&dir));

    loader.load(LoadOptions::default()).unwrap();

    // a changed raw file is not noticed without force_clean
    let truncated: String = RAW_EXTRACT.lines().take(2).map(|l| format!("{}\n", l)).collect();
    std::fs::write(&raw_path, truncated).unwrap();

    let cached = loader.load(LoadOptions::default()).unwrap();
    assert!(cached.from_cache());
    assert_eq!(cached.batch.num_rows(), 3);

    let rebuilt = loader
        .load(LoadOptions {
            force_clean: true,
            force_scrape: false,
        })
        .unwrap();
    assert!(!rebuilt.from_cache());
    assert_eq!(rebuilt.batch.num_rows(), 1);
}

#[test]
fn test_recleaning_output_is_stable() {
    let dir = TempDir::new().unwrap();
    let loader = DatasetLoader::new(write_raw(&dir), cleaned_path(&dir));
    let first = loader.load(LoadOptions::default()).unwrap();

    let reloaded = TableReader::new().read_cleaned(loader.clean_path()).unwrap();
    let second = CleaningPipeline::new().run(&reloaded).unwrap();

    assert_eq!(second.batch, first.batch);
}

#[test]
fn test_schema_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let raw_path = dir.path().join("raw.csv");
    std::fs::write(&raw_path, "DisNo.,Country,Start Year\n2010-0017-HTI,Haiti,2010\n").unwrap();
    let clean_path = cleaned_path(&dir);

    let err = DatasetLoader::new(&raw_path, &clean_path)
        .with_report(true)
        .load(LoadOptions::default())
        .unwrap_err();

    assert_eq!(
        err.missing_columns().unwrap(),
        &["DisasterGroup".to_string(), "ISO".to_string()]
    );
    assert!(!clean_path.exists());
    assert!(!report_path_for(&clean_path).exists());
}

#[test]
fn test_summary_of_cleaned_file() {
    let dir = TempDir::new().unwrap();
    let loader = DatasetLoader::new(write_raw(&dir), cleaned_path(&dir));
    loader.load(LoadOptions::default()).unwrap();

    let summary = SummaryAnalyzer::new()
        .analyze_file(loader.clean_path())
        .unwrap();
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.year_range, Some((1990, 2010)));
    assert_eq!(summary.distinct_countries, 2);
    assert_eq!(summary.negative_durations, 1);
    assert_eq!(summary.total_deaths, 222582.0);
}

#[test]
fn test_repeated_headers_are_not_collapsed() {
    let dir = TempDir::new().unwrap();
    let raw_path = dir.path().join("raw.csv");
    std::fs::write(
        &raw_path,
        "DisNo.,Disaster Group,ISO,Country,Start Year,Notes,Notes\n\
2010-0017-HTI,Natural,HTI,Haiti,2010,first,second\n",
    )
    .unwrap();

    let loaded = DatasetLoader::new(&raw_path, cleaned_path(&dir))
        .load(LoadOptions::default())
        .unwrap();

    let notes = text_column(&loaded.batch, "Notes").unwrap();
    assert_eq!(notes.value(0), "first");
    let second = text_column(&loaded.batch, "Notes2").unwrap();
    assert_eq!(second.value(0), "second");
    assert!(!second.is_null(0));
}
