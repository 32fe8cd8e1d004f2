//! Targeted Identifier Derivation
//!
//! Pure building block for issuing pseudonymous, per-relationship user
//! identifiers in an identity-federation exchange. Given a secret salt, the
//! two parties of the exchange and the user's identifying attribute value, a
//! stable 40-character hex identifier is produced. No I/O, no global state:
//! the salt is handed in by the caller.
//!
//! # Payload Layout
//!
//! Every variable-length field is length-prefixed so that distinct
//! (source, destination, user) triples never concatenate to the same bytes.
//!
//! ```text
//! "uidhashbase" || salt
//!   || len(source)      ":" source
//!   || len(destination) ":" destination
//!   || len(user)        ":" user
//!   || salt
//!        │
//!        ▼
//!      SHA-1 → 40 lowercase hex chars
//! ```
//!
//! Party identifiers are built from federation metadata with
//! [`encode_party`]:
//!
//! ```text
//! "set" || len(metadata_set) ":" metadata_set
//!   || "set" || len(entity_id) ":" entity_id
//! ```
//!
//! Both fields carry the `set` tag. Identifiers already issued depend on it.
//!
//! # Security
//!
//! Pseudonymity:
//! - The salt enters the payload twice and is never part of the output
//! - Without the salt neither the user value nor the salt can be recovered
//!
//! Unlinkability:
//! - Each (source, destination) pair yields a different identifier for the
//!   same user
//!
//! SHA-1 is kept for compatibility with deployed identifiers. The property
//! relied upon is input hiding via the secret salt, not collision resistance.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod targeted_id;

pub use targeted_id::{
    DerivedIdentifier, IdentifierDeriver, SaltError, SecretSalt, derive_targeted_id, encode_party,
};
