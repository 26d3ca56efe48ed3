use levellog::diagnostics::Diagnostics;
use levellog::logger::*;
use levellog::settings::*;
use levellog::{log_error, log_info, log_warn};

// $ cargo run --bin logger_demo -- --level warn --path /tmp/demo.log
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let diagnostics = Diagnostics::new_bootstrap();

    let mut project_settings = parse_settings(cli.settings.as_deref())?;
    project_settings.apply_cli(&cli);
    diagnostics.reload_from_config(&project_settings.diagnostics_config())?;

    let logger = Logger::from_config(&project_settings.log_config())?;
    log_info!(logger, "bootstrap info log, level=%s", logger.level().as_str());
    log_warn!(logger, "bootstrap warn log");
    log_error!(logger, "bootstrap error log, code=%d", 2);

    logger.set_level(Level::Info);
    log_info!(logger, "application info log, pi=%.2f", 12.3456);
    log_warn!(logger, "application warn log, missing=%d");
    log_error!(logger, "application error log", "extra");

    Ok(())
}
