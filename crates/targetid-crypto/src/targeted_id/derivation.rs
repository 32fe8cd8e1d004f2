//! Targeted identifier derivation using salted SHA-1

use std::fmt;

use sha1::{Digest, Sha1};

use super::salt::SecretSalt;

/// Tag opening every derivation payload
const PAYLOAD_TAG: &[u8] = b"uidhashbase";

/// Pseudonymous identifier: 40 lowercase hexadecimal characters.
///
/// Recomputed on every call; carries no state beyond the digest text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DerivedIdentifier(String);

impl DerivedIdentifier {
    /// Length of the hex encoding of a SHA-1 digest.
    pub const LEN: usize = 40;

    /// Hex text of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the hex text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DerivedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DerivedIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DerivedIdentifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DerivedIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<DerivedIdentifier> for String {
    fn from(id: DerivedIdentifier) -> Self {
        id.0
    }
}

/// Derive the targeted identifier for a (source, destination, user) triple.
///
/// `source_id` and `destination_id` are party identifiers as produced by
/// [`super::encode_party`]; pass `""` for an unknown party. `user_id` is the
/// raw value of the identifying attribute and should be non-empty; that is
/// the caller's check to make.
///
/// # Security
///
/// - Deterministic: same inputs always produce the same identifier
/// - Length prefixes keep field boundaries unambiguous
/// - The salt is hashed, never emitted
pub fn derive_targeted_id(
    salt: &SecretSalt,
    source_id: &str,
    destination_id: &str,
    user_id: &str,
) -> DerivedIdentifier {
    let mut hasher = Sha1::new();
    hasher.update(PAYLOAD_TAG);
    hasher.update(salt.as_bytes());
    for field in [source_id, destination_id, user_id] {
        hasher.update(field.len().to_string().as_bytes());
        hasher.update(b":");
        hasher.update(field.as_bytes());
    }
    hasher.update(salt.as_bytes());

    DerivedIdentifier(hex::encode(hasher.finalize()))
}

/// Derivation bound to a single secret salt.
///
/// The salt is injected at construction instead of read from process-wide
/// configuration. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct IdentifierDeriver {
    salt: SecretSalt,
}

impl IdentifierDeriver {
    /// Create a deriver for the given salt.
    pub fn new(salt: SecretSalt) -> Self {
        Self { salt }
    }

    /// Derive the identifier for a triple. See [`derive_targeted_id`].
    pub fn derive(&self, source_id: &str, destination_id: &str, user_id: &str) -> DerivedIdentifier {
        derive_targeted_id(&self.salt, source_id, destination_id, user_id)
    }
}
