//! Error types for the targeted identifier filter.
//!
//! Two classes of failure:
//! - Configuration errors, detected when the filter is built
//! - Per-request errors (missing identifying attribute, unavailable salt)
//!
//! Both abort processing of the current request. Neither ever carries salt
//! material or the raw user identifier.

use targetid_crypto::SaltError;
use thiserror::Error;

/// Malformed filter configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration text is not valid TOML
    #[error("invalid filter configuration: {0}")]
    Parse(String),

    /// Option present with the wrong type
    #[error("invalid value for option '{option}': expected {expected}")]
    InvalidType {
        /// Option name
        option: &'static str,
        /// Human-readable expected type
        expected: &'static str,
    },

    /// String option present but empty
    #[error("option '{option}' must not be empty")]
    EmptyValue {
        /// Option name
        option: &'static str,
    },
}

/// Errors raised while building or running the filter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Filter configuration rejected at construction time
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configured identifying attribute absent from the request, or its first
    /// value empty
    #[error("missing attribute '{name}', which is needed to generate the targeted ID")]
    MissingAttribute {
        /// Name of the identifying attribute
        name: String,
    },

    /// No identifying attribute configured and the request has no non-empty
    /// user id
    #[error("no user id available to generate the targeted ID")]
    MissingUserId,

    /// Secret salt could not be obtained
    #[error("secret salt: {0}")]
    Salt(#[from] SaltError),
}

impl FilterError {
    /// Whether this error stems from configuration rather than the request.
    ///
    /// Salt failures count as configuration: the deployment, not the request,
    /// is at fault.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Salt(_))
    }
}
