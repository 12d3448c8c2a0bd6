//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::errors::CliError;

/// pagefx: landing-page counter and tab carousel effects.
#[derive(Parser, Debug)]
#[command(name = "pagefx", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Page description JSON (default: built-in demo page).
    #[arg(long, env = "PAGEFX_PAGE")]
    pub page: Option<PathBuf>,

    /// Effect options JSON.
    #[arg(long, env = "PAGEFX_OPTIONS")]
    pub options: Option<PathBuf>,

    /// Length of the headless run (e.g., "10s", "500ms").
    #[arg(long, default_value = "10s", env = "PAGEFX_SIMULATE")]
    pub simulate: String,

    /// Simulated frame interval in milliseconds.
    #[arg(long, default_value = "16")]
    pub frame_interval_ms: f64,

    /// Scroll every metric into view at start.
    #[arg(long)]
    pub reveal_all: bool,

    /// JSON list of timed pointer/scroll events replayed during the run.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Launch the interactive terminal preview.
    #[arg(long)]
    pub tui: bool,

    /// Print the final snapshot as JSON.
    #[arg(long)]
    pub json: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only output the metric texts).
    #[arg(short, long)]
    pub quiet: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Headless run length.
    pub fn simulate_duration(&self) -> Result<Duration, CliError> {
        parse_duration(&self.simulate).ok_or_else(|| CliError::Duration(self.simulate.clone()))
    }
}

/// Parse a duration string like "500ms", "30s", "2m".
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_secs(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_formats() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("12"), Some(Duration::from_secs(12)));
    }

    #[test]
    fn parse_duration_ms() {
        assert_eq!(parse_duration("1ms"), Some(Duration::from_millis(1)));
        assert_eq!(parse_duration(" 500ms "), Some(Duration::from_millis(500)));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration("-5s"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn parse_duration_rejects_minute_overflow() {
        let huge = format!("{}m", u64::MAX);
        assert_eq!(parse_duration(&huge), None);
        let config = AppConfig::try_parse_from(["pagefx", "--simulate", &huge]).unwrap();
        assert!(matches!(config.simulate_duration(), Err(CliError::Duration(_))));
    }

    #[test]
    fn defaults() {
        let config = AppConfig::try_parse_from(["pagefx"]).unwrap();
        assert_eq!(config.simulate_duration().unwrap(), Duration::from_secs(10));
        assert!((config.frame_interval_ms - 16.0).abs() < f64::EPSILON);
        assert!(!config.tui);
        assert!(config.page.is_none());
    }

    #[test]
    fn bad_duration_is_a_config_error() {
        let config = AppConfig::try_parse_from(["pagefx", "--simulate", "forever"]).unwrap();
        assert!(matches!(config.simulate_duration(), Err(CliError::Duration(_))));
    }
}
