use serde::{Deserialize, Serialize};

use crate::library::{
    definitions::{HASH_DATE_BONUS, HASH_SITE_BONUS, HASH_WEIGHT_BASE, HASH_WEIGHT_PER_BIT, STRONG_NAME_BONUS, STRONG_NAME_MATCH},
    disambiguation::DistanceCandidate,
    fingerprint::{distance, duration_matches, Fingerprint, PerceptualHash},
    ScoringCfg,
};

/// What is known about the file being matched: the fields parsed out of its filename, plus
/// the locally computed fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub fingerprint: Option<Fingerprint>,
}

/// One search result returned by a metadata provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub fingerprints: Vec<Fingerprint>,
}

impl CandidateInfo {
    /// The provider's key for this result. Empty when the provider supplied neither a guid
    /// nor a uuid.
    pub fn identifier(&self) -> &str {
        match self.guid.as_deref() {
            Some(guid) if !guid.is_empty() => guid,
            _ => self.uuid.as_deref().unwrap_or(""),
        }
    }
}

/// A scored match attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub identifier: String,
    pub title: String,
    pub site: String,
    pub date: Option<String>,
    pub hash_distance: Option<u32>,
    pub duration_agrees: Option<bool>,
    pub name_match: f64,
    pub site_match: bool,
    pub date_match: bool,
}

impl Candidate {
    pub fn is_identified(&self) -> bool {
        !self.identifier.is_empty()
    }

    pub fn is_strong_name_match(&self) -> bool {
        self.site_match && self.date_match && self.name_match >= STRONG_NAME_MATCH
    }

    /// The `(identifier, distance)` pair the decision engine consumes. Candidates without a
    /// distance or without an identifier cannot take part in the decision.
    pub fn distance_candidate(&self) -> Option<DistanceCandidate> {
        match self.hash_distance {
            Some(distance) if self.is_identified() => Some(DistanceCandidate::new(self.identifier.as_str(), distance)),
            _ => None,
        }
    }
}

pub fn score(query: &QueryInfo, candidate: &CandidateInfo, cfg: &ScoringCfg) -> Candidate {
    let (hash_distance, duration_agrees) = match phash_metrics(query, candidate, cfg.duration_tolerance) {
        Some((dist, agrees)) => (Some(dist), agrees),
        None => (None, None),
    };

    Candidate {
        identifier: candidate.identifier().to_string(),
        title: candidate.name.clone(),
        site: candidate.site.clone(),
        date: candidate.date.clone(),
        hash_distance,
        duration_agrees,
        name_match: name_ratio(&query.name, &candidate.name),
        site_match: sites_match(&query.site, &candidate.site),
        date_match: dates_match(query.date.as_deref(), candidate.date.as_deref()),
    }
}

/// Minimum distance from the query hash to any comparable pHash fingerprint of the candidate,
/// along with the duration verdict for that fingerprint.
fn phash_metrics(query: &QueryInfo, candidate: &CandidateInfo, tolerance: f64) -> Option<(u32, Option<bool>)> {
    let query_fp = query.fingerprint.as_ref()?;
    let query_hash = match query_fp.perceptual_hash()? {
        Ok(hash) => hash,
        Err(e) => {
            debug!(target: "scoring", "Ignoring unusable query hash: {}", e);
            return None;
        }
    };
    if !query_hash.is_standard_width() {
        debug!(target: "scoring", "Query hash is {} bits wide, only hashes of the same width are comparable", query_hash.bit_width());
    }

    let mut best: Option<(u32, &Fingerprint)> = None;
    for fp in &candidate.fingerprints {
        let dist = match fp.perceptual_hash() {
            Some(Ok(hash)) => comparable_distance(&query_hash, &hash),
            Some(Err(e)) => {
                trace!(target: "scoring", "Skipping fingerprint of {}: {}", candidate.identifier(), e);
                None
            }
            None => None,
        };

        if let Some(dist) = dist {
            if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                best = Some((dist, fp));
            }
        }
    }

    best.map(|(dist, fp)| {
        let agrees = query_fp
            .duration
            .map(|query_duration| duration_matches(query_duration, fp.duration, tolerance));
        (dist, agrees)
    })
}

fn comparable_distance(query_hash: &PerceptualHash, hash: &PerceptualHash) -> Option<u32> {
    let dist = distance(query_hash, hash);
    if dist.is_none() {
        trace!(target: "scoring",
            "Skipping {}-bit fingerprint against {}-bit query hash",
            hash.bit_width(),
            query_hash.bit_width()
        );
    }
    dist
}

/// Fuzzy similarity of two names on a 0-100 scale. 0 if either is empty.
pub fn name_ratio(query_name: &str, candidate_name: &str) -> f64 {
    let query_name = query_name.trim().to_lowercase();
    let candidate_name = candidate_name.trim().to_lowercase();
    if query_name.is_empty() || candidate_name.is_empty() {
        return 0.0;
    }

    strsim::normalized_levenshtein(&query_name, &candidate_name) * 100.0
}

pub fn sites_match(query_site: &str, candidate_site: &str) -> bool {
    if query_site.is_empty() || candidate_site.is_empty() {
        return false;
    }
    candidate_site.to_lowercase().contains(&query_site.to_lowercase())
}

pub fn dates_match(query_date: Option<&str>, candidate_date: Option<&str>) -> bool {
    match (query_date, candidate_date) {
        (Some(q), Some(c)) if !q.is_empty() => q == c,
        _ => false,
    }
}

/// Ordering weight for presenting candidates. Hash evidence dominates; a strong filename
/// match is worth about as much as an identical hash.
pub fn match_weight(candidate: &Candidate) -> f64 {
    let mut weight = 0.0;

    if let Some(dist) = candidate.hash_distance {
        weight += (HASH_WEIGHT_BASE - dist as f64 * HASH_WEIGHT_PER_BIT).max(0.0);
        if candidate.site_match {
            weight += HASH_SITE_BONUS;
        }
        if candidate.date_match {
            weight += HASH_DATE_BONUS;
        }
        weight += candidate.name_match;
    }

    if candidate.is_strong_name_match() {
        weight += STRONG_NAME_BONUS + candidate.name_match;
    }

    weight
}

/// Sort candidates by descending [`match_weight`]. Equal weights keep their arrival order.
pub fn rank_candidates(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        match_weight(b)
            .partial_cmp(&match_weight(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

pub fn score_all(query: &QueryInfo, candidates: &[CandidateInfo], cfg: &ScoringCfg) -> Vec<Candidate> {
    let scored = candidates.iter().map(|c| score(query, c, cfg)).collect();
    rank_candidates(scored)
}
