//! Error types for secret salt handling.

use thiserror::Error;

/// Errors raised while obtaining or constructing a secret salt.
///
/// Messages never include salt material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaltError {
    /// Salt has zero length
    #[error("secret salt must not be empty")]
    Empty,

    /// Salt is still the well-known placeholder shipped with default configs
    #[error("secret salt is the default placeholder; configure a real secret")]
    Placeholder,

    /// Salt source could not be read
    #[error("secret salt unavailable from {source_name}: {reason}")]
    Unavailable {
        /// Where the salt was expected (env var name, file path)
        source_name: String,
        /// Why it could not be obtained
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(SaltError::Empty.to_string(), "secret salt must not be empty");

        let err = SaltError::Unavailable {
            source_name: "env TARGETID_SECRET_SALT".to_string(),
            reason: "not set".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "secret salt unavailable from env TARGETID_SECRET_SALT: not set"
        );
    }
}
