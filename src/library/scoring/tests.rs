use super::candidate_scorer::*;
use crate::library::{
    fingerprint::{Fingerprint, HashAlgorithm},
    ScoringCfg,
};

const QUERY_HASH: &str = "0000000000000000";

fn query(fingerprint: Option<Fingerprint>) -> QueryInfo {
    QueryInfo {
        name: "Summer Vacation".to_string(),
        site: "brand".to_string(),
        date: Some("2021-06-01".to_string()),
        fingerprint,
    }
}

fn candidate_info(guid: &str, fingerprints: Vec<Fingerprint>) -> CandidateInfo {
    CandidateInfo {
        guid: Some(guid.to_string()),
        uuid: None,
        name: "summer vacation".to_string(),
        site: "BrandNetwork".to_string(),
        date: Some("2021-06-01".to_string()),
        fingerprints,
    }
}

fn candidate(identifier: &str, hash_distance: Option<u32>) -> Candidate {
    Candidate {
        identifier: identifier.to_string(),
        title: String::new(),
        site: String::new(),
        date: None,
        hash_distance,
        duration_agrees: None,
        name_match: 0.0,
        site_match: false,
        date_match: false,
    }
}

#[test]
fn test_name_ratio() {
    assert!(name_ratio("", "anything") == 0.0);
    assert!(name_ratio("anything", "") == 0.0);
    assert!(name_ratio("Same Name", "same name") == 100.0);

    let r = name_ratio("abcd", "abce");
    assert!((r - 75.0).abs() < 1e-9, "expected 75, got {}", r);
}

#[test]
fn test_sites_match() {
    assert!(sites_match("brand", "BrandNetwork"));
    assert!(sites_match("BRAND", "brandnetwork"));
    assert!(!sites_match("", "BrandNetwork"));
    assert!(!sites_match("brand", ""));
    assert!(!sites_match("other", "BrandNetwork"));
}

#[test]
fn test_dates_match() {
    assert!(dates_match(Some("2021-06-01"), Some("2021-06-01")));
    assert!(!dates_match(Some("2021-06-01"), Some("2021-06-02")));
    assert!(!dates_match(None, Some("2021-06-01")));
    assert!(!dates_match(Some("2021-06-01"), None));
    assert!(!dates_match(Some(""), Some("")));
}

#[test]
fn test_identifier_fallback() {
    let mut info = CandidateInfo::default();
    assert_eq!(info.identifier(), "");

    info.uuid = Some("uuid-1".to_string());
    assert_eq!(info.identifier(), "uuid-1");

    info.guid = Some(String::new());
    assert_eq!(info.identifier(), "uuid-1");

    info.guid = Some("guid-1".to_string());
    assert_eq!(info.identifier(), "guid-1");
}

#[test]
fn test_score_filename_fields() {
    let c = score(&query(None), &candidate_info("A", vec![]), &ScoringCfg::default());

    assert_eq!(c.identifier, "A");
    assert!(c.name_match == 100.0);
    assert!(c.site_match);
    assert!(c.date_match);
    assert!(c.is_strong_name_match());
    assert_eq!(c.hash_distance, None);
    assert_eq!(c.duration_agrees, None);
    assert!(c.distance_candidate().is_none());
}

#[test]
//the closest of several phash submissions wins, and its duration decides agreement
fn test_score_minimum_distance() {
    let q = query(Some(Fingerprint::phash(QUERY_HASH, Some(30.0))));
    let info = candidate_info(
        "A",
        vec![
            Fingerprint::phash("00000000000000ff", Some(30.0)),
            Fingerprint::phash("0000000000000003", Some(31.0)),
            Fingerprint::phash("000000000000000f", Some(30.0)),
        ],
    );

    let c = score(&q, &info, &ScoringCfg::default());
    assert_eq!(c.hash_distance, Some(2));
    assert_eq!(c.duration_agrees, Some(false));

    let loose = ScoringCfg { duration_tolerance: 1.0 };
    let c = score(&q, &info, &loose);
    assert_eq!(c.duration_agrees, Some(true));
}

#[test]
//oshash, malformed and differently sized fingerprints are all skipped
fn test_score_skips_incomparable() {
    let q = query(Some(Fingerprint::phash(QUERY_HASH, Some(30.0))));
    let info = candidate_info(
        "A",
        vec![
            Fingerprint {
                hash: "0000000000000000".to_string(),
                algorithm: HashAlgorithm::Oshash,
                duration: Some(30.0),
            },
            Fingerprint::phash("not hex at all!!", Some(30.0)),
            Fingerprint::phash("00000000", Some(30.0)),
        ],
    );

    let c = score(&q, &info, &ScoringCfg::default());
    assert_eq!(c.hash_distance, None);
    assert_eq!(c.duration_agrees, None);
}

#[test]
fn test_score_without_query_duration() {
    let q = query(Some(Fingerprint::phash(QUERY_HASH, None)));
    let info = candidate_info("A", vec![Fingerprint::phash("0000000000000001", Some(30.0))]);

    let c = score(&q, &info, &ScoringCfg::default());
    assert_eq!(c.hash_distance, Some(1));
    assert_eq!(c.duration_agrees, None);
}

#[test]
fn test_score_candidate_without_duration() {
    let q = query(Some(Fingerprint::phash(QUERY_HASH, Some(30.0))));
    let info = candidate_info("A", vec![Fingerprint::phash("0000000000000001", None)]);

    let c = score(&q, &info, &ScoringCfg::default());
    assert_eq!(c.duration_agrees, Some(true));
}

#[test]
fn test_distance_candidate_filtering() {
    let dc = candidate("A", Some(4)).distance_candidate().unwrap();
    assert_eq!(dc.identifier, "A");
    assert_eq!(dc.distance, 4);

    assert!(candidate("A", None).distance_candidate().is_none());
    assert!(candidate("", Some(4)).distance_candidate().is_none());
}

#[test]
fn test_match_weight() {
    assert!(match_weight(&candidate("A", None)) == 0.0);
    assert!(match_weight(&candidate("A", Some(0))) == 1000.0);
    assert!(match_weight(&candidate("A", Some(4))) == 500.0);
    //past 8 bits the hash contributes nothing, but never goes negative
    assert!(match_weight(&candidate("A", Some(20))) == 0.0);

    let mut c = candidate("A", Some(1));
    c.site_match = true;
    c.date_match = true;
    c.name_match = 50.0;
    assert!(match_weight(&c) == 875.0 + 100.0 + 100.0 + 50.0);

    c.name_match = 100.0;
    assert!(match_weight(&c) == 875.0 + 100.0 + 100.0 + 100.0 + 1000.0 + 100.0);
}

#[test]
//ranking is by weight, and equal weights keep their arrival order
fn test_rank_candidates() {
    let ranked = rank_candidates(vec![
        candidate("far", Some(10)),
        candidate("near", Some(1)),
        candidate("first_tie", Some(3)),
        candidate("second_tie", Some(3)),
        candidate("none", None),
    ]);

    let ids: Vec<&str> = ranked.iter().map(|c| c.identifier.as_str()).collect();
    assert_eq!(ids, vec!["near", "first_tie", "second_tie", "far", "none"]);
}
