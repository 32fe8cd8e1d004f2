//! Filter configuration.
//!
//! Options are read from a TOML table. Types are checked when the filter is
//! built so that a bad deployment fails before it serves a single request.
//!
//! ```toml
//! identifying_attribute = "uid"
//! name_id = true
//! target_attribute = "eduPersonTargetedID"
//! ```

use toml::{Table, Value};

use crate::error::ConfigError;

/// Attribute receiving the targeted identifier unless configured otherwise.
pub const DEFAULT_TARGET_ATTRIBUTE: &str = "eduPersonTargetedID";

const IDENTIFYING_ATTRIBUTE: &str = "identifying_attribute";
const NAME_ID: &str = "name_id";
const TARGET_ATTRIBUTE: &str = "target_attribute";

const KNOWN_OPTIONS: [&str; 3] = [IDENTIFYING_ATTRIBUTE, NAME_ID, TARGET_ATTRIBUTE];

/// Targeted identifier filter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Attribute whose first value identifies the user.
    ///
    /// `None` falls back to the request's own user id.
    pub identifying_attribute: Option<String>,
    /// Wrap the result in a qualified [`crate::NameId`].
    pub name_id: bool,
    /// Attribute that receives the result.
    pub target_attribute: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            identifying_attribute: None,
            name_id: false,
            target_attribute: DEFAULT_TARGET_ATTRIBUTE.to_string(),
        }
    }
}

impl FilterConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let table: Table = text.parse().map_err(|e: toml::de::Error| {
            ConfigError::Parse(e.message().to_string())
        })?;
        Self::from_table(&table)
    }

    /// Read configuration from an already-parsed TOML table.
    ///
    /// Unknown options are ignored with a warning.
    pub fn from_table(table: &Table) -> Result<Self, ConfigError> {
        for key in table.keys() {
            if !KNOWN_OPTIONS.contains(&key.as_str()) {
                tracing::warn!(option = %key, "ignoring unknown targeted ID filter option");
            }
        }

        let mut config = Self::default();

        if let Some(value) = table.get(IDENTIFYING_ATTRIBUTE) {
            config.identifying_attribute = Some(string_option(IDENTIFYING_ATTRIBUTE, value)?);
        }

        if let Some(value) = table.get(NAME_ID) {
            config.name_id = value
                .as_bool()
                .ok_or(ConfigError::InvalidType { option: NAME_ID, expected: "a boolean" })?;
        }

        if let Some(value) = table.get(TARGET_ATTRIBUTE) {
            config.target_attribute = string_option(TARGET_ATTRIBUTE, value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants of a programmatically built configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identifying_attribute.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::EmptyValue { option: IDENTIFYING_ATTRIBUTE });
        }
        if self.target_attribute.is_empty() {
            return Err(ConfigError::EmptyValue { option: TARGET_ATTRIBUTE });
        }
        Ok(())
    }
}

fn string_option(option: &'static str, value: &Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(ConfigError::InvalidType { option, expected: "a string" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = FilterConfig::from_toml_str("").unwrap();
        assert_eq!(config, FilterConfig::default());
        assert_eq!(config.target_attribute, "eduPersonTargetedID");
        assert!(!config.name_id);
        assert!(config.identifying_attribute.is_none());
    }

    #[test]
    fn all_options() {
        let config = FilterConfig::from_toml_str(
            r#"
            identifying_attribute = "uid"
            name_id = true
            target_attribute = "targetedId"
            "#,
        )
        .unwrap();

        assert_eq!(config.identifying_attribute.as_deref(), Some("uid"));
        assert!(config.name_id);
        assert_eq!(config.target_attribute, "targetedId");
    }

    #[test]
    fn name_id_must_be_boolean() {
        let err = FilterConfig::from_toml_str(r#"name_id = "yes""#).unwrap_err();
        assert_eq!(err, ConfigError::InvalidType { option: "name_id", expected: "a boolean" });
    }

    #[test]
    fn identifying_attribute_must_be_string() {
        let err = FilterConfig::from_toml_str("identifying_attribute = 42").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidType { option: "identifying_attribute", expected: "a string" }
        );
    }

    #[test]
    fn target_attribute_must_be_string() {
        let err = FilterConfig::from_toml_str(r#"target_attribute = ["a"]"#).unwrap_err();
        assert_eq!(err, ConfigError::InvalidType { option: "target_attribute", expected: "a string" });
    }

    #[test]
    fn empty_attribute_names_rejected() {
        let err = FilterConfig::from_toml_str(r#"identifying_attribute = """#).unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue { option: "identifying_attribute" });

        let err = FilterConfig::from_toml_str(r#"target_attribute = """#).unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue { option: "target_attribute" });
    }

    #[test]
    fn malformed_toml() {
        let err = FilterConfig::from_toml_str("name_id = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_options_ignored() {
        let config = FilterConfig::from_toml_str(r#"colour = "blue""#).unwrap();
        assert_eq!(config, FilterConfig::default());
    }
}
