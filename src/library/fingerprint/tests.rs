use super::{hash_distance::*, perceptual_hash::*};

#[test]
//identical hashes are at distance 0, in both directions
fn test_distance_0() {
    let h1 = PerceptualHash::from(0xdead_beef_0000_ffff_u64);
    let h2 = h1.clone();

    assert!(distance(&h1, &h2) == Some(0));
    assert!(distance(&h2, &h1) == Some(0));
}

#[test]
fn test_distance_all_bits() {
    let empty = PerceptualHash::from(0u64);
    let full = PerceptualHash::from(u64::MAX);

    let d = distance(&empty, &full);
    assert!(d == Some(64), "expected Some(64), got {:?}", d);
    assert!(empty.bit_width() == 64);
    assert!(full.is_standard_width());
}

#[test]
//a single flipped bit in every byte
fn test_distance_one_bit_per_byte() {
    let h1 = PerceptualHash::from_hex("0000000000000000").unwrap();
    let h2 = PerceptualHash::from_hex("0101010101010101").unwrap();

    assert!(distance(&h1, &h2) == Some(8));
}

#[test]
fn test_distance_is_bounded_by_width() {
    let h1 = PerceptualHash::from_hex("a5a5a5a5a5a5a5a5").unwrap();
    let h2 = PerceptualHash::from_hex("5a5a5a5a5a5a5a5a").unwrap();

    let d = distance(&h1, &h2).unwrap();
    assert!(d <= h1.bit_width());
    assert!(d == 64);
}

#[test]
//hashes of different widths cannot be compared and are not an error
fn test_distance_width_mismatch() {
    let short = PerceptualHash::from_hex("ffff").unwrap();
    let long = PerceptualHash::from_hex("ffffffffffffffff").unwrap();

    assert!(distance(&short, &long).is_none());
    assert!(distance(&long, &short).is_none());
}

#[test]
fn test_from_hex_errors() {
    assert_eq!(PerceptualHash::from_hex(""), Err(HashParseError::Empty));
    assert_eq!(PerceptualHash::from_hex("   "), Err(HashParseError::Empty));

    //odd length
    assert!(matches!(
        PerceptualHash::from_hex("abc"),
        Err(HashParseError::InvalidHex { .. })
    ));

    //non-hex characters
    assert!(matches!(
        PerceptualHash::from_hex("zzzzzzzzzzzzzzzz"),
        Err(HashParseError::InvalidHex { .. })
    ));
}

#[test]
fn test_hex_case_insensitive() {
    let lower = PerceptualHash::from_hex("c3c3e1f0f8fc7e3f").unwrap();
    let upper = PerceptualHash::from_hex("C3C3E1F0F8FC7E3F").unwrap();

    assert_eq!(lower, upper);
    assert_eq!(lower.to_hex(), "c3c3e1f0f8fc7e3f");
}

#[test]
//absence of a candidate duration never penalizes the candidate
fn test_duration_absent_is_permissive() {
    assert!(duration_matches(30.0, None, 0.0));
    assert!(duration_matches(0.0, None, 0.0));
}

#[test]
fn test_duration_exact_and_tolerance() {
    assert!(duration_matches(30.0, Some(30.0), 0.0));
    assert!(!duration_matches(30.0, Some(31.0), 0.0));
    assert!(duration_matches(30.0, Some(31.0), 1.0));
    assert!(duration_matches(31.0, Some(30.0), 1.0));
    assert!(!duration_matches(30.0, Some(32.5), 2.0));
}

#[test]
fn test_oshash_is_not_perceptual() {
    let fp = Fingerprint {
        hash: "8a1b2c3d4e5f6071".to_string(),
        algorithm: HashAlgorithm::Oshash,
        duration: Some(10.0),
    };
    assert!(fp.perceptual_hash().is_none());

    let fp = Fingerprint::phash("8a1b2c3d4e5f6071", None);
    assert!(matches!(fp.perceptual_hash(), Some(Ok(_))));
}

#[test]
fn test_fingerprint_deserialize() {
    let fp: Fingerprint = serde_json::from_str(r#"{"hash": "ffff", "algorithm": "oshash"}"#).unwrap();

    assert_eq!(fp.algorithm, HashAlgorithm::Oshash);
    assert_eq!(fp.duration, None);
}
