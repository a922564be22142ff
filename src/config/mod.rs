#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_field_path, validate_field_paths, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXT_FIELD: &str = "text";
pub const DEFAULT_LANGUAGE_FIELD: &str = "user.lang";
pub const DEFAULT_SOURCE_FIELD: &str = "source";

fn default_true() -> bool {
    true
}

fn default_text_field() -> String {
    DEFAULT_TEXT_FIELD.to_string()
}

fn default_language_field() -> String {
    DEFAULT_LANGUAGE_FIELD.to_string()
}

fn default_source_field() -> String {
    DEFAULT_SOURCE_FIELD.to_string()
}

/// CsvBuilder 的設定，建構後不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvBuilderConfig {
    /// 輸出欄位（點號路徑），順序即欄位順序
    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub url_columns: usize,

    #[serde(default)]
    pub require_english: bool,

    /// 只在 `require_english` 時生效
    #[serde(default = "default_true")]
    pub check_text_language: bool,

    #[serde(default = "default_language_field")]
    pub language_field: String,

    /// URL、字數與文字語言判斷都讀這個欄位
    #[serde(default = "default_text_field")]
    pub text_field: String,

    #[serde(default = "default_source_field")]
    pub source_field: String,

    #[serde(default)]
    pub compute_word_count: bool,

    #[serde(default)]
    pub normalize_source: bool,

    #[serde(default)]
    pub date_fields: Vec<String>,
}

impl Default for CsvBuilderConfig {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            url_columns: 0,
            require_english: false,
            check_text_language: true,
            language_field: default_language_field(),
            text_field: default_text_field(),
            source_field: default_source_field(),
            compute_word_count: false,
            normalize_source: false,
            date_fields: Vec::new(),
        }
    }
}

impl Validate for CsvBuilderConfig {
    fn validate(&self) -> Result<()> {
        validate_field_paths("fields", &self.fields)?;
        validate_field_paths("date_fields", &self.date_fields)?;
        validate_field_path("language_field", &self.language_field)?;
        validate_field_path("text_field", &self.text_field)?;
        validate_field_path("source_field", &self.source_field)?;
        Ok(())
    }
}
