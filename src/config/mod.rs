pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::{CatalogConfig, LoggingConfig};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cylinder-search")]
#[command(about = "Find where cards sit in the cylinders and what comes after them")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding cards.json and cylinders.json
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, global = true)]
    pub cards: Option<String>,

    #[arg(long, global = true)]
    pub cylinders: Option<String>,

    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show one card
    Card { no: String },
    /// List the whole card catalog
    Cards,
    /// Show the rows of one cylinder
    Cylinder { id: String },
    /// List all cylinders
    Cylinders,
    /// Find a card, or a card followed directly by a second one
    Search {
        first: String,
        second: Option<String>,
    },
    /// Load the data and report problems
    Validate,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔與命令列參數；命令列優先
    pub fn resolve(&self) -> Result<CatalogConfig> {
        let mut config = match &self.config {
            Some(path) => CatalogConfig::from_file(path)?,
            None => CatalogConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data.base_dir = dir.clone();
        }
        if let Some(cards) = &self.cards {
            config.data.cards_path = cards.clone();
        }
        if let Some(cylinders) = &self.cylinders {
            config.data.cylinders_path = cylinders.clone();
        }
        if let Some(format) = self.format {
            config.display.format = format;
        }
        if self.verbose || self.log_json {
            let logging = config.logging.get_or_insert_with(LoggingConfig::default);
            if self.verbose {
                logging.verbose = Some(true);
            }
            if self.log_json {
                logging.json = Some(true);
            }
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = CliConfig::parse_from([
            "cylinder-search",
            "search",
            "3",
            "4P",
            "--data-dir",
            "/srv/data",
            "--format",
            "csv",
            "-v",
        ]);

        match &cli.command {
            Command::Search { first, second } => {
                assert_eq!(first, "3");
                assert_eq!(second.as_deref(), Some("4P"));
            }
            other => panic!("unexpected command {:?}", other),
        }

        let config = cli.resolve().unwrap();
        assert_eq!(config.data.base_dir, "/srv/data");
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(config.verbose());
        assert!(!config.json_logs());
    }
}
