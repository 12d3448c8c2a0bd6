//! pagefx: landing-page counter and tab carousel effects.

use pagefx_lib::{app, config, errors};

fn main() {
    let config = config::AppConfig::parse();

    // Initialize tracing; the TUI owns the screen, so keep it to errors there
    let level = if config.verbose {
        tracing::Level::DEBUG
    } else if config.tui {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    if let Err(err) = app::run(&config) {
        eprintln!("Error: {err:#}");
        std::process::exit(errors::exit_code(&err));
    }
}
