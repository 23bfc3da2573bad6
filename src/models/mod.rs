pub mod frame;
pub mod record;

pub use record::DisasterRecord;
