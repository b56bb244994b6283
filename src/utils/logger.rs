use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 決定日誌過濾器：設定檔的 level 優先於 RUST_LOG，其次才是預設值
pub fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    if let Some(filter) = level.and_then(|l| EnvFilter::try_new(l).ok()) {
        return filter;
    }

    if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("cylinder_search=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("cylinder_search=info"))
    }
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // 給日誌收集器用的結構化輸出
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_wins() {
        let filter = build_filter(false, Some("cylinder_search=trace"));
        assert_eq!(filter.to_string(), "cylinder_search=trace");
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let filter = build_filter(false, Some("cylinder_search=loud"));
        assert_ne!(filter.to_string(), "cylinder_search=loud");
    }
}
