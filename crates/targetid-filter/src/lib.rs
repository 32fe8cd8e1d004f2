//! Targeted Identifier Filter
//!
//! Attribute-processing step that issues a pseudonymous, per-relationship
//! identifier for the authenticated user. Wraps [`targetid_crypto`] with the
//! pieces a deployment needs around it: configuration, salt retrieval, the
//! request's attribute bag and result wrapping.
//!
//! # Flow
//!
//! ```text
//! Request ──► identifying value (configured attribute or user id)
//!         ──► source / destination metadata ──► party identifiers
//! SaltSource ──► SecretSalt
//!                    │
//!                    ▼
//!         derive_targeted_id ──► TargetedId (plain or NameId)
//!                    │
//!                    ▼
//!         Request.attributes[target_attribute] = [result]
//! ```
//!
//! # Errors
//!
//! Configuration is checked when the filter is built
//! ([`ConfigError`]). Per-request failures ([`FilterError::MissingAttribute`],
//! [`FilterError::MissingUserId`], [`FilterError::Salt`]) abort processing of
//! that request; the filter never falls back to a weaker identifier.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
mod error;
mod filter;
mod name_id;
mod request;
pub mod salt;

pub use config::{DEFAULT_TARGET_ATTRIBUTE, FilterConfig};
pub use error::{ConfigError, FilterError};
pub use filter::TargetedIdFilter;
pub use name_id::{NameId, PERSISTENT_FORMAT, TargetedId};
pub use request::{AttributeValue, Attributes, PartyMetadata, Request};
pub use salt::{EnvSalt, FileSalt, SaltSource, StaticSalt};
pub use targetid_crypto::{DerivedIdentifier, SaltError, SecretSalt};
