//! Error handling and exit codes.

use std::path::PathBuf;

use pagefx_core::constants::exit_codes;
use pagefx_core::EffectError;

/// Errors of the command line surface itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid duration {0:?}")]
    Duration(String),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Exit code for an error returned by [`crate::app::run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<EffectError>() {
        return match err {
            EffectError::InvalidOptions(_) | EffectError::InvalidPage(_) => exit_codes::ERROR_CONFIG,
            EffectError::MismatchedTabSet { .. } | EffectError::TabOutOfRange { .. } | EffectError::UnknownElement(_) => {
                exit_codes::ERROR_GENERIC
            }
        };
    }
    if err.downcast_ref::<CliError>().is_some() {
        return exit_codes::ERROR_CONFIG;
    }
    exit_codes::ERROR_GENERIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        let config = anyhow::Error::from(EffectError::InvalidPage("empty".into()));
        assert_eq!(exit_code(&config), 4);
        let options = anyhow::Error::from(EffectError::InvalidOptions("threshold".into()));
        assert_eq!(exit_code(&options), 4);
        let tab = anyhow::Error::from(EffectError::TabOutOfRange { index: 7, count: 3 });
        assert_eq!(exit_code(&tab), 1);
        assert_eq!(exit_code(&anyhow::Error::from(CliError::Duration("x".into()))), 4);
        assert_eq!(exit_code(&anyhow::anyhow!("TUI error")), 1);
    }

    #[test]
    fn context_keeps_the_code() {
        let err = anyhow::Error::from(EffectError::InvalidPage("empty".into())).context("loading page");
        assert_eq!(exit_code(&err), 4);
    }
}
