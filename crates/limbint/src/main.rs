//! limbcalc: reverse-Polish calculator over arbitrary-precision integers.

use std::process::ExitCode;

use limbint_app::{app, config, errors};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = config::AppConfig::parse();

    let default_level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var(config::LOG_ENV)
                .from_env_lossy(),
        )
        .init();

    match app::run(&config) {
        Ok(()) => ExitCode::from(errors::exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("limbcalc: {err:#}");
            ExitCode::from(errors::exit_code(&err))
        }
    }
}
