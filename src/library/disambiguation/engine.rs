use std::fmt;

use serde::{Deserialize, Serialize};

use crate::library::{matches::tally_identifiers, Thresholds};

/// The minimal input to [`decide`]: which remote entity a candidate refers to, and how far
/// its perceptual hash is from the query's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistanceCandidate {
    pub identifier: String,
    pub distance: u32,
}

impl DistanceCandidate {
    pub fn new(identifier: impl Into<String>, distance: u32) -> Self {
        Self {
            identifier: identifier.into(),
            distance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "verdict", content = "identifier")]
pub enum Decision {
    Accept(String),
    Ambiguous,
    Reject,
}

impl Decision {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Decision::Accept(id) => Some(id),
            Decision::Ambiguous | Decision::Reject => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accept(_) => write!(f, "accept"),
            Decision::Ambiguous => write!(f, "ambiguous"),
            Decision::Reject => write!(f, "reject"),
        }
    }
}

/// Classify a set of hash-matched candidates.
///
/// The candidate with the smallest distance is the "best". It is accepted outright when it is
/// within `accept_distance` and is either alone, far enough ahead of the runner-up, or backed
/// by a majority of all submissions. A best distance inside the ambiguous band, or a close
/// contest without a majority, is ambiguous. Everything else is rejected.
///
/// Ties on distance keep their input order. Thresholds are used as given and are not
/// validated here.
pub fn decide(candidates: &[DistanceCandidate], thresholds: &Thresholds) -> Decision {
    let mut sorted: Vec<&DistanceCandidate> = candidates.iter().collect();
    sorted.sort_by_key(|c| c.distance);

    let best = match sorted.first() {
        Some(best) => *best,
        None => return Decision::Reject,
    };

    if best.distance <= thresholds.accept_distance {
        let second = match sorted.get(1) {
            Some(second) => *second,
            None => return Decision::Accept(best.identifier.clone()),
        };

        let margin = second.distance - best.distance;
        if margin >= thresholds.distance_margin_accept {
            return Decision::Accept(best.identifier.clone());
        }

        match majority(&sorted) {
            Some((top_id, fraction))
                if top_id == best.identifier && fraction >= thresholds.majority_accept_fraction =>
            {
                Decision::Accept(best.identifier.clone())
            }
            _ => Decision::Ambiguous,
        }
    } else if (thresholds.ambiguous_min..=thresholds.ambiguous_max).contains(&best.distance) {
        Decision::Ambiguous
    } else {
        Decision::Reject
    }
}

/// The most common identifier among `candidates` and the fraction of all candidates that
/// carry it. On a count tie the identifier seen first wins.
pub fn majority_fraction(candidates: &[DistanceCandidate]) -> Option<(&str, f64)> {
    let refs: Vec<&DistanceCandidate> = candidates.iter().collect();
    majority(&refs)
}

fn majority<'a>(candidates: &[&'a DistanceCandidate]) -> Option<(&'a str, f64)> {
    let tally = tally_identifiers(candidates.iter().map(|c| c.identifier.as_str()));

    let mut top: Option<(&str, usize)> = None;
    for (id, count) in tally {
        if top.map_or(true, |(_, top_count)| count > top_count) {
            top = Some((id, count));
        }
    }

    top.map(|(id, count)| (id, count as f64 / candidates.len() as f64))
}
