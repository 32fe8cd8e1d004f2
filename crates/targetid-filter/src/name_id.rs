//! Result wrapping: plain identifier or qualified name identifier.

use serde::Deserialize;
use targetid_crypto::DerivedIdentifier;

use crate::request::PartyMetadata;

/// Name identifier format for persistent pseudonyms.
pub const PERSISTENT_FORMAT: &str = "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent";

fn persistent_format() -> String {
    PERSISTENT_FORMAT.to_string()
}

/// Structured name identifier qualified by the parties that issued and
/// received it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameId {
    /// Identifier value
    pub value: String,
    /// Name identifier format URI
    #[serde(default = "persistent_format")]
    pub format: String,
    /// Entity id of the issuing party
    #[serde(default)]
    pub name_qualifier: Option<String>,
    /// Entity id of the relying party
    #[serde(default)]
    pub sp_name_qualifier: Option<String>,
}

impl NameId {
    /// Persistent name identifier with no qualifiers.
    pub fn persistent(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: persistent_format(),
            name_qualifier: None,
            sp_name_qualifier: None,
        }
    }

    /// Qualify with the source party's entity id.
    #[must_use]
    pub fn with_name_qualifier(mut self, qualifier: Option<String>) -> Self {
        self.name_qualifier = qualifier;
        self
    }

    /// Qualify with the destination party's entity id.
    #[must_use]
    pub fn with_sp_name_qualifier(mut self, qualifier: Option<String>) -> Self {
        self.sp_name_qualifier = qualifier;
        self
    }
}

/// Outcome of the filter: either the bare identifier or a qualified
/// [`NameId`] carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetedId {
    /// Bare hex identifier
    Plain(DerivedIdentifier),
    /// Identifier wrapped with party qualifiers
    Qualified(NameId),
}

impl TargetedId {
    /// Build the result for a derived identifier.
    ///
    /// With `qualified` set, qualifiers come from the entity ids of the
    /// source and destination when known.
    pub fn build(
        id: DerivedIdentifier,
        qualified: bool,
        source: Option<&PartyMetadata>,
        destination: Option<&PartyMetadata>,
    ) -> Self {
        if !qualified {
            return Self::Plain(id);
        }

        let name_qualifier = source.and_then(|party| party.entity_id.clone());
        let sp_name_qualifier = destination.and_then(|party| party.entity_id.clone());

        Self::Qualified(
            NameId::persistent(id.into_string())
                .with_name_qualifier(name_qualifier)
                .with_sp_name_qualifier(sp_name_qualifier),
        )
    }

    /// Identifier text regardless of wrapping.
    pub fn value(&self) -> &str {
        match self {
            Self::Plain(id) => id.as_str(),
            Self::Qualified(name_id) => &name_id.value,
        }
    }
}
