use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;

use crate::library::scoring::Candidate;

/// Count occurrences of each identifier, in order of first appearance.
pub fn tally_identifiers<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<(&str, usize)> = vec![];

    for id in identifiers {
        match positions.get(id) {
            Some(&pos) => tally[pos].1 += 1,
            None => {
                positions.insert(id, tally.len());
                tally.push((id, 1));
            }
        }
    }

    tally
}

/// All candidates that refer to the same remote entity.
///
/// `majority_fraction` only counts submissions with a hash distance, the same set the
/// decision engine votes over. It is 0 for a group with no hash evidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateGroup {
    pub identifier: String,
    pub title: String,
    pub site: String,
    pub date: Option<String>,
    pub count: usize,
    pub min_distance: Option<u32>,
    pub majority_fraction: f64,
    pub has_duration_match: bool,
}

impl CandidateGroup {
    fn from_members(identifier: &str, members: &[&Candidate], hashed_total: usize) -> Self {
        let first = members[0];
        let hashed = members.iter().filter(|c| c.hash_distance.is_some()).count();

        Self {
            identifier: identifier.to_string(),
            title: first.title.clone(),
            site: first.site.clone(),
            date: first.date.clone(),
            count: members.len(),
            min_distance: members.iter().filter_map(|c| c.hash_distance).min(),
            majority_fraction: if hashed_total == 0 {
                0.0
            } else {
                hashed as f64 / hashed_total as f64
            },
            has_duration_match: members.iter().any(|c| c.duration_agrees == Some(true)),
        }
    }

    fn presentation_order(&self, other: &Self) -> Ordering {
        let by_distance = match (self.min_distance, other.min_distance) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };

        by_distance.then_with(|| other.count.cmp(&self.count))
    }
}

/// Group candidates by identifier, tightest hash agreement first and then most submissions
/// first. Candidates without an identifier are returned separately.
pub fn group_by_identifier(candidates: &[Candidate]) -> (Vec<CandidateGroup>, Vec<Candidate>) {
    let (identified, unidentified): (Vec<&Candidate>, Vec<&Candidate>) =
        candidates.iter().partition(|c| c.is_identified());

    let tally = tally_identifiers(identified.iter().map(|c| c.identifier.as_str()));
    let hashed_total = identified.iter().filter(|c| c.hash_distance.is_some()).count();

    let mut groups: Vec<CandidateGroup> = tally
        .into_iter()
        .map(|(id, _)| {
            let members: Vec<&Candidate> = identified.iter().copied().filter(|c| c.identifier == id).collect();
            CandidateGroup::from_members(id, &members, hashed_total)
        })
        .collect();

    groups.sort_by(CandidateGroup::presentation_order);

    (groups, unidentified.into_iter().cloned().collect())
}
