//! Fuzz target for targeted identifier derivation and party encoding
//!
//! # Strategy
//!
//! - Arbitrary salts (small, large, non-UTF-8)
//! - Arbitrary party metadata with either field absent
//! - Arbitrary user values, including multibyte text
//!
//! # Invariants
//!
//! - Derivation is deterministic
//! - Output is always 40 lowercase hex characters
//! - Party encoding round-trips through a length-prefixed parse
//! - Changing the user or splitting a field differently changes the output

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use targetid_crypto::{DerivedIdentifier, SecretSalt, derive_targeted_id, encode_party};

#[derive(Debug, Clone, Arbitrary)]
struct DerivationScenario {
    salt: Vec<u8>,
    source: Party,
    destination: Party,
    user: String,
}

#[derive(Debug, Clone, Arbitrary)]
struct Party {
    metadata_set: Option<String>,
    entity_id: Option<String>,
}

impl Party {
    fn encode(&self) -> String {
        encode_party(self.metadata_set.as_deref(), self.entity_id.as_deref())
    }

    fn fields(&self) -> Vec<&str> {
        [self.metadata_set.as_deref(), self.entity_id.as_deref()].into_iter().flatten().collect()
    }
}

/// Parse `("set" len ":" value)*` back into field values.
fn decode_party(mut encoded: &str) -> Option<Vec<&str>> {
    let mut fields = Vec::new();
    while !encoded.is_empty() {
        encoded = encoded.strip_prefix("set")?;
        let (len, rest) = encoded.split_once(':')?;
        let len: usize = len.parse().ok()?;
        fields.push(rest.get(..len)?);
        encoded = rest.get(len..)?;
    }
    Some(fields)
}

fuzz_target!(|scenario: DerivationScenario| {
    // INVARIANT 1: Only empty salts are rejected
    let Ok(salt) = SecretSalt::new(scenario.salt.clone()) else {
        assert!(scenario.salt.is_empty(), "non-empty salt must be accepted");
        return;
    };

    // INVARIANT 2: Party encoding is reversible
    for party in [&scenario.source, &scenario.destination] {
        let encoded = party.encode();
        assert_eq!(decode_party(&encoded), Some(party.fields()), "party encoding must round-trip");
    }

    let source = scenario.source.encode();
    let destination = scenario.destination.encode();

    // INVARIANT 3: Deterministic, well-formed output
    let id = derive_targeted_id(&salt, &source, &destination, &scenario.user);
    let again = derive_targeted_id(&salt, &source, &destination, &scenario.user);
    assert_eq!(id, again, "derivation must be deterministic");
    assert_eq!(id.as_str().len(), DerivedIdentifier::LEN);
    assert!(id.as_str().bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));

    // INVARIANT 4: A different user yields a different identifier
    let other_user = format!("{}x", scenario.user);
    let other = derive_targeted_id(&salt, &source, &destination, &other_user);
    assert_ne!(id, other, "different users must produce different identifiers");

    // INVARIANT 5: Moving the source/destination boundary changes the output
    if !destination.is_empty() {
        let joined = format!("{source}{destination}");
        let shifted = derive_targeted_id(&salt, &joined, "", &scenario.user);
        assert_ne!(id, shifted, "field boundaries must be unambiguous");
    }
});
