use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid JSON record on line {line}: {source}")]
    RecordParseError {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::RecordParseError { .. } | EtlError::SerializationError(_) => {
                ErrorCategory::Input
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::Medium,
            // 寫入失敗代表資料遺失
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::RecordParseError { line, .. } => {
                format!("Input line {} is not valid JSON", line)
            }
            EtlError::IoError(e) => format!("Could not read or write a file: {}", e),
            EtlError::CsvError(e) => format!("Could not write CSV output: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the field paths and options in your config file or command line"
            }
            ErrorCategory::Input => "Make sure the input has one JSON object per line",
            ErrorCategory::Output => {
                "Check that the output path is writable and the disk is not full"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
