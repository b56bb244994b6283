use crate::core::display::{DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_EXTENSION, DEFAULT_STAR_GLYPH};
use crate::core::report::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const ENV_VAR_PATTERN: &str = r"\$\{([^}]+)\}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub catalog: CatalogInfo,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub base_dir: String,
    pub cards_path: String,
    pub cylinders_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_dir: "data".to_string(),
            cards_path: "cards.json".to_string(),
            cylinders_path: "cylinders.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub image_base_url: String,
    pub image_extension: String,
    pub star_glyph: String,
    pub format: OutputFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            star_glyph: DEFAULT_STAR_GLYPH.to_string(),
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"debug"` or `"cylinder_search=trace"`. Overrides `RUST_LOG`.
    pub level: Option<String>,
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl CatalogConfig {
    /// 從 TOML 檔案載入配置；相對的 base_dir 以設定檔所在目錄為準
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;

        let base_dir = Path::new(&config.data.base_dir);
        if base_dir.is_relative() {
            if let Some(parent) = path.as_ref().parent() {
                config.data.base_dir = parent.join(base_dir).to_string_lossy().into_owned();
            }
        }
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = env_var_regex()?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        // 未設定的環境變數會原樣保留在值裡
        let re = env_var_regex()?;
        for (field, value) in [
            ("data.base_dir", &self.data.base_dir),
            ("data.cards_path", &self.data.cards_path),
            ("data.cylinders_path", &self.data.cylinders_path),
            ("display.image_base_url", &self.display.image_base_url),
        ] {
            if let Some(caps) = re.captures(value) {
                return Err(CatalogError::MissingConfigError {
                    field: format!("{} (environment variable {} is not set)", field, &caps[1]),
                });
            }
        }

        validate_path("data.base_dir", &self.data.base_dir)?;
        validate_path("data.cards_path", &self.data.cards_path)?;
        validate_path("data.cylinders_path", &self.data.cylinders_path)?;
        validate_file_extension("data.cards_path", &self.data.cards_path, &["json"])?;
        validate_file_extension("data.cylinders_path", &self.data.cylinders_path, &["json"])?;

        validate_non_empty_string("display.image_extension", &self.display.image_extension)?;
        validate_non_empty_string("display.star_glyph", &self.display.star_glyph)?;

        if let Some(level) = self.log_level() {
            EnvFilter::try_new(level).map_err(|e| CatalogError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: level.to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.base_dir)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.display.format
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

fn env_var_regex() -> Result<Regex> {
    Regex::new(ENV_VAR_PATTERN).map_err(|e| CatalogError::ConfigError {
        message: e.to_string(),
    })
}

impl ConfigProvider for CatalogConfig {
    fn cards_path(&self) -> &str {
        &self.data.cards_path
    }

    fn cylinders_path(&self) -> &str {
        &self.data.cylinders_path
    }

    fn image_base_url(&self) -> &str {
        &self.display.image_base_url
    }

    fn image_extension(&self) -> &str {
        &self.display.image_extension
    }

    fn star_glyph(&self) -> &str {
        &self.display.star_glyph
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
