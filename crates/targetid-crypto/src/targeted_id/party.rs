//! Party identifier encoding from federation metadata

/// Tag written before every metadata field.
///
/// Shared by the metadata-set and entity-id fields. Issued identifiers depend
/// on this exact layout, so it must not be split into per-field tags.
const FIELD_TAG: &str = "set";

/// Encode a party (source or destination) of a federation exchange.
///
/// Each present field contributes `"set" || len ":" value`, metadata set
/// first, entity id second. Absent fields contribute nothing, so an unknown
/// party encodes to the empty string.
///
/// Lengths are byte lengths of the UTF-8 encoding.
pub fn encode_party(metadata_set: Option<&str>, entity_id: Option<&str>) -> String {
    let mut encoded = String::new();
    for field in [metadata_set, entity_id].into_iter().flatten() {
        encoded.push_str(FIELD_TAG);
        encoded.push_str(&field.len().to_string());
        encoded.push(':');
        encoded.push_str(field);
    }

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_present() {
        let encoded = encode_party(Some("saml20-idp-hosted"), Some("urn:example:src:id"));
        assert_eq!(encoded, "set17:saml20-idp-hostedset18:urn:example:src:id");
    }

    #[test]
    fn absent_party_is_empty() {
        assert_eq!(encode_party(None, None), "");
    }

    #[test]
    fn only_entity_id() {
        assert_eq!(encode_party(None, Some("joe")), "set3:joe");
    }

    #[test]
    fn only_metadata_set() {
        assert_eq!(encode_party(Some("saml20-sp-remote"), None), "set16:saml20-sp-remote");
    }

    #[test]
    fn empty_field_is_still_encoded() {
        // Present-but-empty differs from absent
        assert_eq!(encode_party(Some(""), None), "set0:");
        assert_ne!(encode_party(Some(""), None), encode_party(None, None));
    }

    #[test]
    fn length_counts_bytes_not_chars() {
        assert_eq!(encode_party(None, Some("é")), "set2:é");
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let a = encode_party(Some("ab"), Some("c"));
        let b = encode_party(Some("a"), Some("bc"));
        assert_ne!(a, b);
    }
}
