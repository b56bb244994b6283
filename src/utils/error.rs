use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid catalog data in {source_name}: {message}")]
    DataValidationError {
        source_name: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::IoError(_) => ErrorCategory::Io,
            CatalogError::SerializationError(_) | CatalogError::CsvError(_) => ErrorCategory::Data,
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CatalogError::DataValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Data | ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼；一律非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 針對錯誤類型給出修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::IoError(_) => "Check that the data files exist and are readable",
            CatalogError::SerializationError(_) => {
                "Regenerate cards.json / cylinders.json with the extraction script"
            }
            CatalogError::CsvError(_) => "Try another output format (--format json)",
            CatalogError::ConfigError { .. } | CatalogError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax"
            }
            CatalogError::InvalidConfigValueError { .. } => {
                "Fix the highlighted configuration value"
            }
            CatalogError::MissingConfigError { .. } => {
                "Export the referenced environment variable or set the field directly in the config file"
            }
            CatalogError::DataValidationError { .. } => {
                "Fix duplicate or out-of-order entries in the catalog data"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::IoError(e) => format!("Could not read catalog data: {}", e),
            CatalogError::SerializationError(e) => format!("Catalog data is not valid JSON: {}", e),
            CatalogError::DataValidationError {
                source_name,
                message,
            } => format!("{} is inconsistent: {}", source_name, message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_severity() {
        let io = CatalogError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(io.category(), ErrorCategory::Io);
        assert_eq!(io.severity(), ErrorSeverity::Critical);

        let invalid = CatalogError::DataValidationError {
            source_name: "cards.json".to_string(),
            message: "duplicate card 01".to_string(),
        };
        assert_eq!(invalid.category(), ErrorCategory::Validation);
        assert_eq!(invalid.severity(), ErrorSeverity::High);
        assert!(invalid.user_friendly_message().contains("cards.json"));

        let config = CatalogError::InvalidConfigValueError {
            field: "data.cards_path".to_string(),
            value: "cards.csv".to_string(),
            reason: "Unsupported file extension".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.severity(), ErrorSeverity::Medium);

        let missing = CatalogError::MissingConfigError {
            field: "data.base_dir".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        assert!(missing.to_string().contains("data.base_dir"));
    }

    #[test]
    fn test_exit_codes_are_never_success() {
        let errors = [
            CatalogError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "missing")),
            CatalogError::ConfigError {
                message: "bad".to_string(),
            },
            CatalogError::MissingConfigError {
                field: "data.base_dir".to_string(),
            },
            CatalogError::DataValidationError {
                source_name: "cylinders".to_string(),
                message: "duplicate cylinder id A".to_string(),
            },
        ];
        let codes: Vec<i32> = errors.iter().map(CatalogError::exit_code).collect();
        assert_eq!(codes, vec![3, 2, 2, 1]);
    }
}
