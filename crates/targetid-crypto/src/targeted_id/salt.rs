//! Secret salt container

use std::fmt;

use zeroize::Zeroize;

use super::error::SaltError;

/// Confidential byte string mixed into every derivation.
///
/// Guaranteed non-empty. The bytes are zeroized on drop and never rendered by
/// [`fmt::Debug`]. No `PartialEq`: secrets are not compared.
#[derive(Clone)]
pub struct SecretSalt {
    bytes: Vec<u8>,
}

impl SecretSalt {
    /// Wrap salt bytes.
    ///
    /// Fails with [`SaltError::Empty`] for zero-length input.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SaltError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SaltError::Empty);
        }
        Ok(Self { bytes })
    }

    /// Raw salt bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Salt length in bytes. Always non-zero.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SecretSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretSalt(<redacted>)")
    }
}

impl Drop for SecretSalt {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
