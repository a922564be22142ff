pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{JsonLinesSource, LocalFiles};
pub use crate::config::{toml_config::TomlConfig, CsvBuilderConfig};
pub use crate::core::{
    csv_builder::{CsvBuilder, Outcome},
    etl::{EtlEngine, RunSummary},
    flatten::extract_fields,
    language::{ForeignEvidence, Rejection},
    sampler::FieldSampler,
    urls::UrlExtractor,
};
pub use crate::domain::model::{FieldCounts, FieldPath, Lookup, Record};
pub use crate::domain::ports::RecordSource;
pub use crate::utils::error::{EtlError, Result};
