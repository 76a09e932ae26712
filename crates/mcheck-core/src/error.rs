//! Engine error type.

use thiserror::Error;

/// Errors surfaced to the driver before or during a check run.
///
/// Invariant violations are not errors: they are reported through
/// [`crate::report::ModelReport`]. The only failure the core itself can
/// produce is a malformed external configuration.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid policy definition: {0}")]
    Config(String),

    #[error("unknown model '{0}'")]
    UnknownModel(String),
}

pub type CheckResult<T> = Result<T, CheckError>;
