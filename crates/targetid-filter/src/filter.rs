//! Targeted identifier filter.
//!
//! Resolves the user's identifying value from a [`Request`], fetches the
//! secret salt, derives the identifier and writes it back into the request's
//! attributes.

use targetid_crypto::derive_targeted_id;

use crate::{
    config::FilterConfig,
    error::FilterError,
    name_id::TargetedId,
    request::{AttributeValue, Request, party_identifier},
    salt::SaltSource,
};

/// Attribute filter issuing targeted identifiers.
///
/// Configuration is validated once in [`TargetedIdFilter::new`]; the salt is
/// fetched from the injected [`SaltSource`] per request.
#[derive(Debug, Clone)]
pub struct TargetedIdFilter<S> {
    config: FilterConfig,
    salt_source: S,
}

impl<S: SaltSource> TargetedIdFilter<S> {
    /// Build a filter, rejecting invalid configuration.
    pub fn new(config: FilterConfig, salt_source: S) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self { config, salt_source })
    }

    /// Build a filter from TOML configuration text.
    pub fn from_toml(text: &str, salt_source: S) -> Result<Self, FilterError> {
        Self::new(FilterConfig::from_toml_str(text)?, salt_source)
    }

    /// Active configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Compute the targeted identifier for a request without modifying it.
    pub fn compute(&self, request: &Request) -> Result<TargetedId, FilterError> {
        let user_id = self.user_identifier(request)?;
        let salt = self.salt_source.secret_salt()?;

        let source_id = party_identifier(request.source.as_ref());
        let destination_id = party_identifier(request.destination.as_ref());
        let id = derive_targeted_id(&salt, &source_id, &destination_id, user_id);

        let source_entity = request.source.as_ref().and_then(|p| p.entity_id.as_deref());
        let destination_entity = request.destination.as_ref().and_then(|p| p.entity_id.as_deref());
        tracing::debug!(
            source = source_entity.unwrap_or("-"),
            destination = destination_entity.unwrap_or("-"),
            name_id = self.config.name_id,
            "derived targeted identifier"
        );

        Ok(TargetedId::build(
            id,
            self.config.name_id,
            request.source.as_ref(),
            request.destination.as_ref(),
        ))
    }

    /// Compute the identifier and store it as the sole value of the target
    /// attribute, replacing any previous values.
    pub fn process(&self, request: &mut Request) -> Result<(), FilterError> {
        let result = self.compute(request)?;
        request.attributes.set(self.config.target_attribute.clone(), vec![result.into()]);
        Ok(())
    }

    /// Resolve the identifying value. Empty values count as absent: they
    /// would map every such user onto one identifier.
    fn user_identifier<'r>(&self, request: &'r Request) -> Result<&'r str, FilterError> {
        match &self.config.identifying_attribute {
            Some(name) => request
                .attributes
                .first(name)
                .map(AttributeValue::as_text)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| FilterError::MissingAttribute { name: name.clone() }),
            None => request
                .user_id
                .as_deref()
                .filter(|value| !value.is_empty())
                .ok_or(FilterError::MissingUserId),
        }
    }
}
