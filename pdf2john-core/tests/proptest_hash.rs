//! Property-based tests for hash descriptor encoding
//!
//! Checks the invariants of the encoder over generated parameters and
//! verification entries: truncation bounds, field arity, omission of empty
//! entries and determinism.

use pdf2john::diagnostics::CollectingSink;
use pdf2john::encryption::{
    DocumentIdentifier, EncryptionParameters, SecurityRevision, VerificationEntry,
    VerificationRole,
};
use pdf2john::hash::{self, HEADER_FIELD_COUNT};
use proptest::prelude::*;

prop_compose! {
    fn parameters_strategy()(
        algorithm in 0i64..=5,
        key_length in prop_oneof![Just(40i64), Just(128), Just(256)],
        permissions in any::<i32>(),
        revision in -2i64..=10,
        encrypt_metadata in any::<bool>()
    ) -> EncryptionParameters {
        EncryptionParameters {
            algorithm,
            key_length,
            permissions,
            revision,
            encrypt_metadata,
        }
    }
}

fn role_strategy() -> impl Strategy<Value = VerificationRole> {
    prop_oneof![
        Just(VerificationRole::User),
        Just(VerificationRole::Owner),
        Just(VerificationRole::UserKeySeed),
        Just(VerificationRole::OwnerKeySeed),
    ]
}

prop_compose! {
    fn entry_strategy()(
        role in role_strategy(),
        bytes in prop::collection::vec(any::<u8>(), 0..80)
    ) -> VerificationEntry {
        VerificationEntry::new(role, bytes)
    }
}

fn bound_for(revision: i64) -> usize {
    SecurityRevision::from_number(revision)
        .map(SecurityRevision::entry_length)
        .unwrap_or(48)
}

/// Roles that will appear in the output, given first-non-empty-wins
fn emitted_roles(entries: &[VerificationEntry]) -> usize {
    VerificationRole::CANONICAL_ORDER
        .iter()
        .filter(|role| entries.iter().any(|e| e.role() == **role && !e.is_empty()))
        .count()
}

proptest! {
    #[test]
    fn test_arity_matches_entry_count(
        params in parameters_strategy(),
        id in prop::collection::vec(any::<u8>(), 0..32),
        entries in prop::collection::vec(entry_strategy(), 0..6)
    ) {
        let sink = CollectingSink::new();
        let descriptor = hash::encode(&params, &DocumentIdentifier::new(id), &entries, &sink);

        prop_assert_eq!(descriptor.entry_count(), emitted_roles(&entries));
        prop_assert_eq!(
            descriptor.fields().count(),
            HEADER_FIELD_COUNT + 2 * descriptor.entry_count()
        );
    }

    #[test]
    fn test_entry_lengths_respect_revision_bound(
        params in parameters_strategy(),
        entries in prop::collection::vec(entry_strategy(), 1..6)
    ) {
        let sink = CollectingSink::new();
        let descriptor = hash::encode(&params, &DocumentIdentifier::new(vec![0; 16]), &entries, &sink);
        let bound = bound_for(params.revision);

        let fields: Vec<&str> = descriptor.fields().skip(HEADER_FIELD_COUNT).collect();
        for pair in fields.chunks(2) {
            let length: usize = pair[0].parse().unwrap();
            prop_assert!(length > 0);
            prop_assert!(length <= bound);
            prop_assert_eq!(pair[1].len(), length * 2);
        }
    }

    #[test]
    fn test_long_entries_encode_the_bound(
        params in parameters_strategy(),
        extra in 1usize..32
    ) {
        let bound = bound_for(params.revision);
        let entries = [VerificationEntry::new(VerificationRole::User, vec![0x5c; bound + extra])];
        let sink = CollectingSink::new();
        let descriptor = hash::encode(&params, &DocumentIdentifier::new(vec![1; 16]), &entries, &sink);

        let fields: Vec<&str> = descriptor.fields().collect();
        prop_assert_eq!(fields[HEADER_FIELD_COUNT], bound.to_string());
    }

    #[test]
    fn test_encoding_is_deterministic(
        params in parameters_strategy(),
        id in prop::collection::vec(any::<u8>(), 0..32),
        entries in prop::collection::vec(entry_strategy(), 0..6)
    ) {
        let id = DocumentIdentifier::new(id);
        let first = hash::encode(&params, &id, &entries, &CollectingSink::new());
        let second = hash::encode(&params, &id, &entries, &CollectingSink::new());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_header_fields_render_parameters(
        params in parameters_strategy()
    ) {
        let descriptor = hash::encode(&params, &DocumentIdentifier::new(vec![0xee; 4]), &[], &CollectingSink::new());
        let fields: Vec<&str> = descriptor.fields().collect();

        prop_assert_eq!(fields[0], format!("$pdf${}", params.algorithm));
        prop_assert_eq!(fields[1], params.revision.to_string());
        prop_assert_eq!(fields[2], params.key_length.to_string());
        prop_assert_eq!(fields[3], params.permissions.to_string());
        prop_assert_eq!(fields[4], if params.encrypt_metadata { "1" } else { "0" });
        prop_assert_eq!(fields[5], "4");
        prop_assert_eq!(fields[6], "eeeeeeee");
    }

    #[test]
    fn test_only_unknown_revisions_warn(params in parameters_strategy()) {
        let sink = CollectingSink::new();
        hash::encode(&params, &DocumentIdentifier::new(vec![]), &[], &sink);
        let known = SecurityRevision::from_number(params.revision).is_some();
        prop_assert_eq!(sink.is_empty(), known);
    }
}
