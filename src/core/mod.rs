pub mod csv_builder;
pub mod derived;
pub mod etl;
pub mod flatten;
pub mod language;
pub mod sampler;
pub mod urls;

pub use crate::domain::model::{FieldCounts, FieldPath, Lookup, Record};
pub use crate::domain::ports::RecordSource;
pub use crate::utils::error::Result;
