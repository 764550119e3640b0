mod cli;

use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use flora_dashboard::config::init_app_config;
use flora_dashboard::headless;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    init_tracing(config.debug);
    debug!(?config, "Configuration resolved");

    headless::run_headless(&config, &args.record_filter(), args.json, args.regions).await
}

// Logs go to stderr so stdout stays clean for --json
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .init();
}
