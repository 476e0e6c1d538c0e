use route_sync_domain::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// `--log-level` beats `RUST_LOG`, which beats the config file.
pub fn init_logging(cfg: &LoggingConfig, cli_level: Option<&str>) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level)),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if cfg.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
