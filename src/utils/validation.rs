use crate::domain::model::FieldPath;
use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 驗證點號路徑，例如 `user.lang`
pub fn validate_field_path(field_name: &str, path: &str) -> Result<FieldPath> {
    FieldPath::parse(path).map_err(|reason| EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.to_string(),
        reason,
    })
}

pub fn validate_field_paths(field_name: &str, paths: &[String]) -> Result<Vec<FieldPath>> {
    paths
        .iter()
        .map(|path| validate_field_path(field_name, path))
        .collect()
}
