//! Secret salt retrieval.
//!
//! The filter never reads process-wide state for its salt. A [`SaltSource`]
//! is handed to it at construction and asked for the salt on every request.

use std::{env, fs, path::PathBuf};

use targetid_crypto::{SaltError, SecretSalt};
use zeroize::Zeroizing;

/// Placeholder salt shipped in sample configurations.
///
/// A deployment still carrying it has never configured a real secret.
pub const PLACEHOLDER_SALT: &str = "defaultsecretsalt";

/// Default environment variable holding the salt.
pub const DEFAULT_SALT_ENV: &str = "TARGETID_SECRET_SALT";

/// Provider of the process-wide secret salt.
///
/// # Invariants
///
/// - Returned salts are non-empty (guaranteed by [`SecretSalt`])
/// - The placeholder salt is never returned
/// - Errors never contain salt material
pub trait SaltSource: Send + Sync {
    /// Fetch the current secret salt.
    fn secret_salt(&self) -> Result<SecretSalt, SaltError>;
}

impl<T: SaltSource + ?Sized> SaltSource for &T {
    fn secret_salt(&self) -> Result<SecretSalt, SaltError> {
        (**self).secret_salt()
    }
}

impl<T: SaltSource + ?Sized> SaltSource for Box<T> {
    fn secret_salt(&self) -> Result<SecretSalt, SaltError> {
        (**self).secret_salt()
    }
}

impl<T: SaltSource + ?Sized> SaltSource for std::sync::Arc<T> {
    fn secret_salt(&self) -> Result<SecretSalt, SaltError> {
        (**self).secret_salt()
    }
}

/// Validate raw salt bytes. Rejected buffers are wiped on drop; accepted ones
/// move into the returned salt without a copy.
fn checked(mut bytes: Zeroizing<Vec<u8>>) -> Result<SecretSalt, SaltError> {
    if bytes.as_slice() == PLACEHOLDER_SALT.as_bytes() {
        return Err(SaltError::Placeholder);
    }
    SecretSalt::new(std::mem::take(&mut *bytes))
}

/// Salt held in memory, typically loaded once at startup.
#[derive(Debug, Clone)]
pub struct StaticSalt {
    salt: SecretSalt,
}

impl StaticSalt {
    /// Wrap an already-validated salt. Rejects the placeholder.
    pub fn new(salt: SecretSalt) -> Result<Self, SaltError> {
        if salt.as_bytes() == PLACEHOLDER_SALT.as_bytes() {
            return Err(SaltError::Placeholder);
        }
        Ok(Self { salt })
    }

    /// Build from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, SaltError> {
        Ok(Self { salt: checked(Zeroizing::new(bytes.into()))? })
    }
}

impl SaltSource for StaticSalt {
    fn secret_salt(&self) -> Result<SecretSalt, SaltError> {
        Ok(self.salt.clone())
    }
}

/// Salt read from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvSalt {
    var: String,
}

impl EnvSalt {
    /// Read the salt from `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable consulted.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvSalt {
    fn default() -> Self {
        Self::new(DEFAULT_SALT_ENV)
    }
}

impl SaltSource for EnvSalt {
    fn secret_salt(&self) -> Result<SecretSalt, SaltError> {
        let value = env::var_os(&self.var).ok_or_else(|| SaltError::Unavailable {
            source_name: format!("env {}", self.var),
            reason: "not set".to_string(),
        })?;
        checked(Zeroizing::new(value.into_encoded_bytes()))
    }
}

/// Salt read from a file. One trailing newline (LF or CRLF) is stripped.
#[derive(Debug, Clone)]
pub struct FileSalt {
    path: PathBuf,
}

impl FileSalt {
    /// Read the salt from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SaltSource for FileSalt {
    fn secret_salt(&self) -> Result<SecretSalt, SaltError> {
        let mut bytes =
            Zeroizing::new(fs::read(&self.path).map_err(|e| SaltError::Unavailable {
                source_name: format!("file {}", self.path.display()),
                reason: e.kind().to_string(),
            })?);
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        checked(bytes)
    }
}
