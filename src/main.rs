use anyhow::Context;
use blogdeck::cli::Cli;
use blogdeck::config::Config;
use blogdeck::logging::init_tracing;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_from(&cli.config_path())?;
    cli.apply(&mut config);
    config.validate()?;

    let log_path = Cli::log_path(&config);
    init_tracing(&log_path, &config.logging.level)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    blogdeck::ui::runtime::run(config)?;
    Ok(())
}
