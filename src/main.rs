use anyhow::Context;
use clap::Parser;
use cylinder_search::core::report::{
    render_cards, render_cylinder, render_cylinders, render_matches, render_validation,
};
use cylinder_search::core::ConfigProvider;
use cylinder_search::utils::{logger, validation::Validate};
use cylinder_search::{
    normalize_card_no, CatalogConfig, CatalogStore, CliConfig, Command, DisplayOptions,
    LocalStorage, QueryEngine,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並合併配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if config.json_logs() {
        logger::init_json_logger(config.verbose(), config.log_level());
    } else {
        logger::init_cli_logger(config.verbose(), config.log_level());
    }

    tracing::info!("🚀 Starting cylinder-search");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::new(config.base_dir());
    let catalog = match CatalogStore::load(&storage, config.cards_path(), config.cylinders_path()) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(
                "❌ Loading catalog failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let output = run(&cli.command, &config, &catalog)?;
    print!("{}", output);
    Ok(())
}

fn run(command: &Command, config: &CatalogConfig, catalog: &CatalogStore) -> anyhow::Result<String> {
    let format = config.output_format();
    let display = DisplayOptions::from_config(config);

    match command {
        Command::Card { no } => {
            let card_no = normalize_card_no(no);
            match catalog.get_card(&card_no) {
                Some(card) => {
                    render_cards(format, &[card], &display).context("rendering card")
                }
                None => {
                    eprintln!("No card {} in the catalog", card_no);
                    Ok(String::new())
                }
            }
        }
        Command::Cards => {
            let cards: Vec<_> = catalog.all_cards().iter().collect();
            render_cards(format, &cards, &display).context("rendering card list")
        }
        Command::Cylinder { id } => match catalog.get_cylinder(id) {
            Some(cylinder) => render_cylinder(format, cylinder).context("rendering cylinder"),
            None => {
                eprintln!("No cylinder {} in the catalog", id);
                Ok(String::new())
            }
        },
        Command::Cylinders => {
            render_cylinders(format, catalog.all_cylinders()).context("rendering cylinder list")
        }
        Command::Search { first, second } => {
            let engine = QueryEngine::new(catalog);
            let matches = engine.search(first, second.as_deref());
            tracing::info!("🔍 {} match(es)", matches.len());
            render_matches(format, catalog, &matches, &display).context("rendering matches")
        }
        Command::Validate => {
            let warnings = catalog.lint();
            render_validation(format, catalog, &warnings).context("rendering validation report")
        }
    }
}
