//! Property-based tests for targeted identifier derivation.
//!
//! These tests verify critical invariants:
//! - Derivation is deterministic
//! - Output is always 40 lowercase hex characters
//! - Changing the user or a party changes the identifier
//! - An absent party encodes exactly like empty metadata

use proptest::prelude::*;
use targetid_crypto::{DerivedIdentifier, IdentifierDeriver, SecretSalt, derive_targeted_id, encode_party};

fn salt_strategy() -> impl Strategy<Value = SecretSalt> {
    prop::collection::vec(any::<u8>(), 1..64).prop_map(|bytes| SecretSalt::new(bytes).unwrap())
}

fn party_strategy() -> impl Strategy<Value = String> {
    (prop::option::of(".{0,24}"), prop::option::of(".{0,48}"))
        .prop_map(|(set, entity)| encode_party(set.as_deref(), entity.as_deref()))
}

fn is_lower_hex(id: &DerivedIdentifier) -> bool {
    id.as_str().len() == DerivedIdentifier::LEN
        && id.as_str().bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

proptest! {
    /// Same inputs always produce the same identifier.
    #[test]
    fn prop_derive_is_deterministic(
        salt in salt_strategy(),
        source in party_strategy(),
        destination in party_strategy(),
        user in ".{1,64}",
    ) {
        let first = derive_targeted_id(&salt, &source, &destination, &user);
        let second = derive_targeted_id(&salt, &source, &destination, &user);
        prop_assert_eq!(first, second);
    }

    /// Output matches `^[0-9a-f]{40}$`.
    #[test]
    fn prop_output_format(
        salt in salt_strategy(),
        source in party_strategy(),
        destination in party_strategy(),
        user in ".{1,64}",
    ) {
        let id = derive_targeted_id(&salt, &source, &destination, &user);
        prop_assert!(is_lower_hex(&id), "malformed identifier: {}", id);
    }

    /// Distinct users under the same parties get distinct identifiers.
    #[test]
    fn prop_user_sensitivity(
        salt in salt_strategy(),
        source in party_strategy(),
        destination in party_strategy(),
        user_a in ".{1,32}",
        user_b in ".{1,32}",
    ) {
        prop_assume!(user_a != user_b);
        let a = derive_targeted_id(&salt, &source, &destination, &user_a);
        let b = derive_targeted_id(&salt, &source, &destination, &user_b);
        prop_assert_ne!(a, b);
    }

    /// Distinct destinations give the same user distinct identifiers.
    #[test]
    fn prop_destination_sensitivity(
        salt in salt_strategy(),
        entity_a in "[a-z:./-]{1,32}",
        entity_b in "[a-z:./-]{1,32}",
        user in ".{1,32}",
    ) {
        prop_assume!(entity_a != entity_b);
        let source = encode_party(Some("saml20-idp-hosted"), Some("urn:example:src:id"));
        let dest_a = encode_party(Some("saml20-sp-remote"), Some(&entity_a));
        let dest_b = encode_party(Some("saml20-sp-remote"), Some(&entity_b));

        let a = derive_targeted_id(&salt, &source, &dest_a, &user);
        let b = derive_targeted_id(&salt, &source, &dest_b, &user);
        prop_assert_ne!(a, b);
    }

    /// Moving bytes across a field boundary never collides.
    #[test]
    fn prop_field_split_is_unambiguous(
        salt in salt_strategy(),
        joined in "[a-z]{2,32}",
        split in 1usize..32,
        user in ".{1,16}",
    ) {
        let split = split.min(joined.len() - 1);
        let (left, right) = joined.split_at(split);
        let whole = derive_targeted_id(&salt, &joined, "", &user);
        let parted = derive_targeted_id(&salt, left, right, &user);
        prop_assert_ne!(whole, parted);
    }

    /// Party encoding is injective over (metadata set, entity id).
    #[test]
    fn prop_encode_party_injective(
        a in (prop::option::of("[a-z0-9:]{0,12}"), prop::option::of("[a-z0-9:]{0,12}")),
        b in (prop::option::of("[a-z0-9:]{0,12}"), prop::option::of("[a-z0-9:]{0,12}")),
    ) {
        let encoded_a = encode_party(a.0.as_deref(), a.1.as_deref());
        let encoded_b = encode_party(b.0.as_deref(), b.1.as_deref());
        // Only the fields' values are encoded, not which slot they came from
        let fields_a: Vec<_> = [&a.0, &a.1].into_iter().flatten().collect();
        let fields_b: Vec<_> = [&b.0, &b.1].into_iter().flatten().collect();
        if fields_a != fields_b {
            prop_assert_ne!(encoded_a, encoded_b);
        } else {
            prop_assert_eq!(encoded_a, encoded_b);
        }
    }

    /// The bound deriver agrees with the free function.
    #[test]
    fn prop_deriver_matches_free_function(
        salt in salt_strategy(),
        source in party_strategy(),
        user in ".{1,32}",
    ) {
        let deriver = IdentifierDeriver::new(salt.clone());
        prop_assert_eq!(
            deriver.derive(&source, "", &user),
            derive_targeted_id(&salt, &source, "", &user)
        );
    }
}

/// An unknown party and a party with no metadata fields are the same input.
#[test]
fn absent_party_equals_empty_metadata() {
    let salt = SecretSalt::new("secretsalt").unwrap();
    let empty = encode_party(None, None);

    let omitted = derive_targeted_id(&salt, "", "", "user2@example.org");
    let supplied = derive_targeted_id(&salt, &empty, &empty, "user2@example.org");

    assert_eq!(omitted, supplied);
}

/// Concurrent callers sharing one deriver see identical results.
#[test]
fn concurrent_derivation_is_consistent() {
    let deriver = IdentifierDeriver::new(SecretSalt::new("secretsalt").unwrap());
    let expected = deriver.derive("", "", "user2@example.org");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| deriver.derive("", "", "user2@example.org")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
