/// Identity and classification columns
pub const COL_DIS_NO: &str = "DisNo";
pub const COL_DISASTER_GROUP: &str = "DisasterGroup";
pub const COL_DISASTER_SUBGROUP: &str = "DisasterSubgroup";
pub const COL_DISASTER_TYPE: &str = "DisasterType";
pub const COL_REGION: &str = "Region";
pub const COL_SUBREGION: &str = "Subregion";
pub const COL_ISO: &str = "ISO";
pub const COL_COUNTRY: &str = "Country";
pub const COL_LOCATION: &str = "Location";
pub const COL_EXTERNAL_IDS: &str = "ExternalIDs";

/// Derived identifier columns
pub const COL_YEAR_ID: &str = "YearID";
pub const COL_SEQUENCE_ID: &str = "SequenceID";
pub const COL_HAS_EXTERNAL_IDS: &str = "HasExternalIDs";

/// Date part columns
pub const COL_START_YEAR: &str = "StartYear";
pub const COL_START_MONTH: &str = "StartMonth";
pub const COL_START_DAY: &str = "StartDay";
pub const COL_END_YEAR: &str = "EndYear";
pub const COL_END_MONTH: &str = "EndMonth";
pub const COL_END_DAY: &str = "EndDay";

/// Derived date columns
pub const COL_START_DATE: &str = "StartDate";
pub const COL_END_DATE: &str = "EndDate";
pub const COL_DURATION_DAYS: &str = "DurationDays";

/// Impact columns
pub const COL_TOTAL_DEATHS: &str = "TotalDeaths";
pub const COL_NO_INJURED: &str = "NoInjured";
pub const COL_NO_AFFECTED: &str = "NoAffected";
pub const COL_NO_HOMELESS: &str = "NoHomeless";
pub const COL_TOTAL_AFFECTED: &str = "TotalAffected";

/// Clean monetary columns, in thousands of US$
pub const COL_RECONSTRUCTION_COSTS: &str = "ReconstructionCosts";
pub const COL_INSURED_DAMAGE: &str = "InsuredDamage";
pub const COL_TOTAL_DAMAGE: &str = "TotalDamage";

/// Unit suffix carried by raw monetary headers
pub const MONETARY_SUFFIX: &str = " ('000 US$)";

/// Columns whose absence aborts the pipeline
pub const MANDATORY_COLUMNS: [&str; 5] = [
    COL_DIS_NO,
    COL_DISASTER_GROUP,
    COL_ISO,
    COL_COUNTRY,
    COL_START_YEAR,
];

/// Raw monetary labels and the clean column each one feeds
pub const MONETARY_COLUMNS: [(&str, &str); 3] = [
    ("Reconstruction Costs", COL_RECONSTRUCTION_COSTS),
    ("Insured Damage", COL_INSURED_DAMAGE),
    ("Total Damage", COL_TOTAL_DAMAGE),
];

pub const IMPACT_COLUMNS: [&str; 5] = [
    COL_TOTAL_DEATHS,
    COL_NO_INJURED,
    COL_NO_AFFECTED,
    COL_NO_HOMELESS,
    COL_TOTAL_AFFECTED,
];

/// Yes/no flag columns
pub const COL_HISTORIC: &str = "Historic";
pub const BINARY_COLUMNS: [&str; 4] = [COL_HISTORIC, "OFDABHAResponse", "Appeal", "Declaration"];

/// (year, month, day) columns per date prefix, and the date column they build
pub const DATE_PARTS: [(&str, [&str; 3], &str); 2] = [
    (
        "Start",
        [COL_START_YEAR, COL_START_MONTH, COL_START_DAY],
        COL_START_DATE,
    ),
    (
        "End",
        [COL_END_YEAR, COL_END_MONTH, COL_END_DAY],
        COL_END_DATE,
    ),
];

/// Columns removed once normalization is complete
pub const UNUSED_COLUMNS: [&str; 20] = [
    "ClassificationKey",
    "OFDABHAResponse",
    "Appeal",
    "Declaration",
    "AID Contribution ('000 US$)",
    "RiverBasin",
    "Reconstruction Costs ('000 US$)",
    "Reconstruction Costs, Adjusted ('000 US$)",
    "Insured Damage ('000 US$)",
    "Insured Damage, Adjusted ('000 US$)",
    "Total Damage ('000 US$)",
    "Total Damage, Adjusted ('000 US$)",
    "CPI",
    "AdminUnits",
    "EntryDate",
    "LastUpdate",
    COL_EXTERNAL_IDS,
    "RiversList",
    "RiverCount",
    "GeoLocation",
];

/// File names
pub const RAW_DATA_FILE: &str = "raw_disasters.csv";
pub const CLEAN_DATA_FILE: &str = "emdat_cleaned.csv";
pub const REPORT_SUFFIX: &str = "report.json";

/// Directory names
pub const RAW_DIR: &str = "data/raw";
pub const CLEAN_DIR: &str = "data/clean";

/// Processing defaults
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
