//! Targeted identifier derivation: salt handling, party encoding, hashing.

mod derivation;
mod error;
mod party;
mod salt;

pub use derivation::{DerivedIdentifier, IdentifierDeriver, derive_targeted_id};
pub use error::SaltError;
pub use party::encode_party;
pub use salt::SecretSalt;
