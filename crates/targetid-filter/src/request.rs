//! Request model: user attributes and the parties of the exchange.

use std::collections::{BTreeMap, btree_map};

use serde::Deserialize;
use targetid_crypto::encode_party;

use crate::name_id::{NameId, TargetedId};

/// Federation metadata describing one party of the exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartyMetadata {
    /// Metadata set the party was loaded from (e.g. `saml20-sp-remote`)
    #[serde(default, alias = "metadata-set")]
    pub metadata_set: Option<String>,
    /// Entity identifier of the party
    #[serde(default, alias = "entityid")]
    pub entity_id: Option<String>,
}

impl PartyMetadata {
    /// Metadata with the given fields.
    pub fn new(metadata_set: Option<&str>, entity_id: Option<&str>) -> Self {
        Self {
            metadata_set: metadata_set.map(str::to_string),
            entity_id: entity_id.map(str::to_string),
        }
    }

    /// Length-prefixed party identifier fed into derivation.
    pub fn party_identifier(&self) -> String {
        encode_party(self.metadata_set.as_deref(), self.entity_id.as_deref())
    }
}

/// Party identifier of an optional party. Unknown parties encode to `""`.
pub(crate) fn party_identifier(party: Option<&PartyMetadata>) -> String {
    party.map(PartyMetadata::party_identifier).unwrap_or_default()
}

/// Single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Plain text value
    Text(String),
    /// Structured name identifier
    NameId(NameId),
}

impl AttributeValue {
    /// Text form of the value. A name identifier yields its value.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::NameId(name_id) => &name_id.value,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<TargetedId> for AttributeValue {
    fn from(id: TargetedId) -> Self {
        match id {
            TargetedId::Plain(id) => Self::Text(id.into_string()),
            TargetedId::Qualified(name_id) => Self::NameId(name_id),
        }
    }
}

/// Multi-valued user attributes, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Vec<AttributeValue>>);

impl Attributes {
    /// Empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// All values of an attribute.
    pub fn get(&self, name: &str) -> Option<&[AttributeValue]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// First value of an attribute, if any.
    pub fn first(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name).and_then(|values| values.first())
    }

    /// Replace all values of an attribute.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<AttributeValue>) {
        self.0.insert(name.into(), values);
    }

    /// Append one value to an attribute.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    /// Whether the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attributes are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<AttributeValue>> {
        self.0.iter()
    }
}

/// State of one authentication exchange as seen by the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Request {
    /// User attributes; the filter writes its result here
    pub attributes: Attributes,
    /// Identifier of the authenticated user, used when no identifying
    /// attribute is configured
    pub user_id: Option<String>,
    /// Issuing party
    pub source: Option<PartyMetadata>,
    /// Relying party
    pub destination: Option<PartyMetadata>,
}

impl Request {
    /// Parse a request description from TOML.
    ///
    /// ```toml
    /// user_id = "student"
    ///
    /// [attributes]
    /// uid = ["student"]
    ///
    /// [source]
    /// metadata-set = "saml20-idp-hosted"
    /// entityid = "urn:example:src:id"
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
