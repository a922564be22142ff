use crate::config::toml_config::{SamplingConfig, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "status-to-csv")]
#[command(about = "Convert JSON status records into CSV rows")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON lines input (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<String>,

    /// CSV output path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write accepted statuses as JSON lines to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Comma-separated dotted field paths, e.g. text,user.screen_name
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    #[arg(long)]
    pub url_columns: Option<usize>,

    #[arg(long, help = "Only keep statuses whose user.lang is en")]
    pub require_english: bool,

    #[arg(long, help = "Trust the declared language without checking the text")]
    pub no_text_check: bool,

    #[arg(long)]
    pub compute_word_count: bool,

    #[arg(long)]
    pub normalize_source: bool,

    /// Comma-separated date fields to split into calendar columns
    #[arg(long, value_delimiter = ',')]
    pub date_fields: Vec<String>,

    /// Print the fields found in the first N statuses instead of writing CSV
    #[arg(long)]
    pub sample_fields: Option<usize>,

    #[arg(long, help = "Do not write the header line")]
    pub no_header: bool,

    #[arg(long, help = "Append to the CSV output instead of truncating it")]
    pub append: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 載入 TOML（若有指定），再以命令列參數覆蓋
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(input) = &self.input {
            config.input.path = Some(input.clone());
        }
        if let Some(output) = &self.output {
            config.output.csv_path = Some(output.clone());
        }
        if let Some(json) = &self.json {
            config.output.json_path = Some(json.clone());
        }
        if self.no_header {
            config.output.write_header = false;
        }
        if self.append {
            config.output.append = true;
        }

        let builder = &mut config.builder;
        if !self.fields.is_empty() {
            builder.fields = self.fields.clone();
        }
        if let Some(url_columns) = self.url_columns {
            builder.url_columns = url_columns;
        }
        if self.require_english {
            builder.require_english = true;
        }
        if self.no_text_check {
            builder.check_text_language = false;
        }
        if self.compute_word_count {
            builder.compute_word_count = true;
        }
        if self.normalize_source {
            builder.normalize_source = true;
        }
        if !self.date_fields.is_empty() {
            builder.date_fields = self.date_fields.clone();
        }

        if let Some(records) = self.sample_fields {
            config.sampling = Some(SamplingConfig { records });
        }
    }
}
