use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use serde::Serialize;

use super::{group_by_identifier, CandidateGroup};
use crate::library::{definitions::SUMMARY_FILE_SUFFIX, disambiguation::Decision, scoring::Candidate, LibError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    #[serde(flatten)]
    pub candidate: Candidate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub best_identifier: Option<String>,
    pub best_min_distance: Option<u32>,
    pub second_min_distance: Option<u32>,
    pub distance_margin: Option<u32>,
    pub top_fraction: Option<f64>,
}

/// Human readable audit trail of one match attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub decision: Decision,
    pub ambiguous: bool,
    pub candidates: Vec<RankedCandidate>,
    pub groups: Vec<CandidateGroup>,
    pub unidentified: Vec<Candidate>,
    pub stats: SummaryStats,
}

impl MatchSummary {
    /// `ranked` must already be in presentation order.
    pub fn new(decision: Decision, ranked: &[Candidate]) -> Self {
        let (groups, unidentified) = group_by_identifier(ranked);
        let stats = SummaryStats::from_groups(&groups);

        let candidates = ranked
            .iter()
            .enumerate()
            .map(|(idx, candidate)| RankedCandidate {
                rank: idx + 1,
                candidate: candidate.clone(),
            })
            .collect();

        Self {
            ambiguous: decision == Decision::Ambiguous,
            decision,
            candidates,
            groups,
            unidentified,
            stats,
        }
    }

    pub fn path_for(video: &Path) -> PathBuf {
        let stem = video.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        video.with_file_name(format!("{}{}", stem, SUMMARY_FILE_SUFFIX))
    }

    pub fn write_to(&self, path: &Path) -> Result<(), LibError> {
        let to_err = |e: String| LibError::SummaryWriteError {
            src: e,
            path: path.to_path_buf(),
        };

        let file = File::create(path).map_err(|e| to_err(format!("{}", e)))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| to_err(format!("{}", e)))
    }
}

impl SummaryStats {
    fn from_groups(groups: &[CandidateGroup]) -> Self {
        let best = groups.get(0);
        let second = groups.get(1);

        let best_min_distance = best.and_then(|g| g.min_distance);
        let second_min_distance = second.and_then(|g| g.min_distance);
        let distance_margin = match (best_min_distance, second_min_distance) {
            (Some(b), Some(s)) => Some(s.saturating_sub(b)),
            _ => None,
        };

        Self {
            best_identifier: best.map(|g| g.identifier.clone()),
            best_min_distance,
            second_min_distance,
            distance_margin,
            top_fraction: best
                .filter(|g| g.min_distance.is_some())
                .map(|g| (g.majority_fraction * 1000.0).round() / 1000.0),
        }
    }
}
