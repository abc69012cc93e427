use anyhow::Result;
use link_info::config::{self, LogFormat};
use link_info::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    init_tracing(&config.log_level, config.log_format)?;
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber, `RUST_LOG`-style filter, text or JSON output.
fn init_tracing(log_level: &str, log_format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).or_else(|_| EnvFilter::try_new("info"))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }

    Ok(())
}
