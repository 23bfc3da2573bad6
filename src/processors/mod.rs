pub mod binary_fields;
pub mod coerce;
pub mod countries;
pub mod dates;
pub mod identifiers;
pub mod impact;
pub mod monetary;
pub mod pipeline;
pub mod pruner;
pub mod report;
pub mod schema_validator;
pub mod stage;

pub use binary_fields::BinaryFieldNormalizer;
pub use countries::CountryNormalizer;
pub use dates::DateNormalizer;
pub use identifiers::IdentifierNormalizer;
pub use impact::ImpactNormalizer;
pub use monetary::MonetaryNormalizer;
pub use pipeline::{CleanedDataset, CleaningPipeline};
pub use pruner::ColumnPruner;
pub use report::CleaningReport;
pub use schema_validator::SchemaValidator;
pub use stage::{CleaningStage, StageOutput, StageReport};
