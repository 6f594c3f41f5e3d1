//! Integration tests for the hashing facade over the real `argon2` primitive.
//!
//! Costs are kept small so the suite stays fast; the properties under test
//! do not depend on the cost magnitude.

use argon_hash::{
    Encoded, Encoding, HashCandidate, PrimitiveErrorKind, ValidationError, Variant, Version,
    WipeFlags, hash, hash_raw,
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use proptest::prelude::*;

fn small(password: &str, salt: &str) -> HashCandidate {
    HashCandidate::new(password, salt)
        .with_time_cost(1)
        .with_memory_cost(64)
        .with_parallelism(1)
}

fn base() -> HashCandidate {
    small("correct horse", "battery staple 16B")
}

fn digest(candidate: HashCandidate) -> Vec<u8> {
    hash_raw(candidate).unwrap().into_digest()
}

fn from_hex(text: &str) -> Vec<u8> {
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).unwrap())
        .collect()
}

mod scenario {
    use super::*;

    fn scenario() -> HashCandidate {
        HashCandidate::new("correct horse", "battery staple 16B")
            .with_variant("id")
            .with_hash_length(32)
            .with_time_cost(2)
            .with_memory_cost(512)
            .with_parallelism(2)
    }

    #[test]
    fn reproduces_same_digest() {
        let first = digest(scenario());
        let second = digest(scenario());
        assert_eq!(first.len(), 32);
        assert_eq!(first, second);
    }

    #[test]
    fn hex_is_64_lowercase_chars() {
        let encoded = hash(scenario()).unwrap();
        let text = encoded.as_str().unwrap();
        assert_eq!(text.len(), 64);
        assert!(text.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn hex_decodes_to_raw() {
        let raw = digest(base());
        let encoded = hash(base().with_encoding("hex")).unwrap();
        assert_eq!(encoded.encoding(), Encoding::Hex);
        assert_eq!(from_hex(encoded.as_str().unwrap()), raw);
    }

    #[test]
    fn base64_decodes_to_raw() {
        let raw = digest(base());
        let encoded = hash(base().with_encoding("base64")).unwrap();
        assert_eq!(BASE64.decode(encoded.as_str().unwrap()).unwrap(), raw);
    }

    #[test]
    fn raw_encoding_is_the_digest() {
        let raw = digest(base());
        assert_eq!(hash(base().with_encoding(Encoding::Raw)).unwrap(), Encoded::Raw(raw));
    }
}

mod sensitivity {
    use super::*;

    #[test]
    fn every_axis_changes_the_digest() {
        let reference = digest(base());
        let variations = [
            ("password", small("correct horsf", "battery staple 16B")),
            ("salt", small("correct horse", "battery staple 16C")),
            ("secret", base().with_secret("pepper")),
            ("variant d", base().with_variant(Variant::D)),
            ("variant i", base().with_variant(Variant::I)),
            ("version", base().with_version(Version::V0x10)),
            ("time cost", base().with_time_cost(2)),
            ("memory cost", base().with_memory_cost(128)),
            ("hash length", base().with_hash_length(31)),
        ];

        for (axis, candidate) in variations {
            assert_ne!(digest(candidate), reference, "{axis} did not change the digest");
        }
    }

    #[test]
    fn empty_secret_equals_no_secret() {
        assert_eq!(digest(base().with_secret("")), digest(base()));
        assert_eq!(digest(base().with_secret(Vec::<u8>::new())), digest(base()));
    }

    #[test]
    fn text_and_bytes_agree() {
        let from_bytes = HashCandidate::new(b"correct horse", b"battery staple 16B")
            .with_time_cost(1)
            .with_memory_cost(64)
            .with_parallelism(1);
        assert_eq!(digest(from_bytes), digest(base()));
    }

    #[test]
    fn wipe_flags_do_not_change_the_digest() {
        assert_eq!(
            digest(base().with_secret("pepper").with_wipe(WipeFlags::empty())),
            digest(base().with_secret("pepper"))
        );
    }

    #[test]
    fn associated_data_changes_the_digest() {
        assert_ne!(digest(base().with_associated_data("context")), digest(base()));
    }
}

mod rejection {
    use super::*;

    #[test]
    fn validation_errors_name_the_value() {
        let err = hash(base().with_variant("x")).unwrap_err();
        assert_eq!(err.to_string(), "unsupported variant 'x'");

        let err = hash(base().with_encoding("yaml")).unwrap_err();
        assert_eq!(err.to_string(), "unsupported encoding 'yaml'");

        let err = hash_raw(base().with_parallelism(0)).unwrap_err();
        assert_eq!(err.to_string(), "parallelism must be strictly positive, got 0");
    }

    #[test]
    fn primitive_bounds_surface_as_typed_errors() {
        let err = hash_raw(HashCandidate::new("pw", "salt").with_memory_cost(64)).unwrap_err();
        assert_eq!(err.as_primitive().unwrap().kind(), PrimitiveErrorKind::SaltTooShort);

        let err = hash_raw(base().with_hash_length(2)).unwrap_err();
        assert_eq!(err.as_primitive().unwrap().kind(), PrimitiveErrorKind::OutputTooShort);

        let err = hash_raw(base().with_memory_cost(8).with_parallelism(2)).unwrap_err();
        assert_eq!(err.as_primitive().unwrap().kind(), PrimitiveErrorKind::MemoryTooLittle);
    }

    #[test]
    fn oversized_memory_cost_is_an_allocation_error() {
        let err = hash_raw(base().with_memory_cost(i64::from(u32::MAX))).unwrap_err();
        let primitive = err.as_primitive().unwrap();
        assert_eq!(primitive.kind(), PrimitiveErrorKind::MemoryAllocation);
        assert_eq!(primitive.code(), -22);
    }

    #[test]
    fn unknown_version_is_a_validation_error() {
        let err = hash_raw(base().with_version(0x11u32)).unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::UnsupportedVersion(0x11)));
    }
}

mod known_answer {
    //! RFC 9106 section 5 test vectors.
    use super::*;

    fn rfc_candidate(variant: Variant) -> HashCandidate {
        HashCandidate::new([1u8; 32].to_vec(), [2u8; 16].to_vec())
            .with_secret([3u8; 8].to_vec())
            .with_associated_data([4u8; 12].to_vec())
            .with_hash_length(32)
            .with_time_cost(3)
            .with_memory_cost(32)
            .with_parallelism(4)
            .with_variant(variant)
            .with_version(Version::V0x13)
    }

    fn hex_digest(variant: Variant) -> String {
        hash(rfc_candidate(variant).with_encoding(Encoding::Hex))
            .unwrap()
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn argon2d() {
        assert_eq!(
            hex_digest(Variant::D),
            "512b391b6f1162975371d30919734294f868e3be3984f3c1a13a4db9fabe4acb"
        );
    }

    #[test]
    fn argon2i() {
        assert_eq!(
            hex_digest(Variant::I),
            "c814d9d1dc7f37aa13f0d77f2494bda1c8de6b016dd388d29952a4c4672b6ce8"
        );
    }

    #[test]
    fn argon2id() {
        assert_eq!(
            hex_digest(Variant::Id),
            "0d640df58d78766c08c037a34a8b53c9d01ef0452d75b65eb52520e96b01e659"
        );
    }
}

mod concurrency {
    use super::*;
    use std::thread;

    #[test]
    fn parallel_calls_are_independent() {
        let expected = digest(base());
        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(|| digest(base())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn digest_length_matches_request(hash_length in 4i64..=96) {
        let result = hash_raw(base().with_hash_length(hash_length)).unwrap();
        prop_assert_eq!(result.len() as i64, hash_length);
    }
}
