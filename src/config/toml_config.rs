use crate::config::CsvBuilderConfig;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub builder: CsvBuilderConfig,
    pub sampling: Option<SamplingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// JSON lines 檔案；未設定時讀 stdin
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 未設定時寫到 stdout
    pub csv_path: Option<String>,
    /// 另存通過過濾的原始 status（每行一個 JSON）
    pub json_path: Option<String>,
    #[serde(default = "default_write_header")]
    pub write_header: bool,
    #[serde(default)]
    pub append: bool,
}

fn default_write_header() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            json_path: None,
            write_header: true,
            append: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// 取樣多少筆通過過濾的 status
    pub records: usize,
}

fn env_var_re() -> &'static Regex {
    static ENV_VAR_RE: OnceLock<Regex> = OnceLock::new();
    ENV_VAR_RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_re()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn sample_limit(&self) -> Option<usize> {
        self.sampling.as_ref().map(|s| s.records)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.builder.validate()?;

        if let Some(path) = &self.input.path {
            validate_path("input.path", path)?;
        }
        if let Some(path) = &self.output.csv_path {
            validate_path("output.csv_path", path)?;
        }
        if let Some(path) = &self.output.json_path {
            validate_path("output.json_path", path)?;
        }
        if let Some(sampling) = &self.sampling {
            validate_positive_number("sampling.records", sampling.records, 1)?;
        }

        Ok(())
    }
}
