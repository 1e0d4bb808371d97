use std::path::PathBuf;

use itertools::Either::{Left, Right};
use itertools::Itertools;
use rayon::prelude::*;

use crate::library::{
    disambiguation::{decide, majority_fraction, Decision, DistanceCandidate},
    matches::MatchSummary,
    scoring::{score_all, Candidate},
    *,
};

/// The outcome of evaluating one match report.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub video: PathBuf,
    pub decision: Decision,
    pub summary: MatchSummary,
}

impl Evaluation {
    /// The highest ranked candidate carrying the accepted identifier.
    pub fn accepted_candidate(&self) -> Option<&Candidate> {
        let id = self.decision.identifier()?;
        self.summary
            .candidates
            .iter()
            .map(|ranked| &ranked.candidate)
            .find(|c| c.identifier == id)
    }
}

/// Load every match report under `src_paths`. Reports that cannot be read or parsed are
/// returned as non-fatal errors.
pub fn load_reports(
    src_paths: &[PathBuf],
    excl_paths: &[PathBuf],
) -> Result<(Vec<MatchReport>, Vec<LibError>), LibError> {
    let (report_paths, enum_errs) = FileSet::new(src_paths, excl_paths).enumerate_from_fs()?;

    trace!(target: "reports", "Found {} match reports", report_paths.len());

    let loaded: Vec<Result<MatchReport, LibError>> =
        report_paths.par_iter().map(|p| MatchReport::load(p)).collect();

    let (reports, mut errs): (Vec<MatchReport>, Vec<LibError>) = loaded.into_iter().partition_map(|r| match r {
        Ok(report) => Left(report),
        Err(e) => Right(e),
    });

    errs.extend(enum_errs.into_iter().map(LibError::from));

    Ok((reports, errs))
}

/// Score, rank and classify the candidates of a single report.
///
/// Hash evidence is decided by [`decide`]. When no candidate has a usable hash distance the
/// best ranked candidate is only accepted on a strong filename match.
pub fn evaluate_report(report: &MatchReport, cfg: &MatchCfg) -> Evaluation {
    let ranked = score_all(&report.query, &report.candidates, &cfg.scoring);

    let distance_candidates: Vec<DistanceCandidate> =
        ranked.iter().filter_map(Candidate::distance_candidate).collect();

    let decision = if distance_candidates.is_empty() {
        match ranked.first() {
            Some(top) if top.is_identified() && top.is_strong_name_match() => Decision::Accept(top.identifier.clone()),
            _ => Decision::Reject,
        }
    } else {
        decide(&distance_candidates, &cfg.thresholds)
    };

    debug!(target: "decision", "{}: {} ({} candidates, {} with a hash distance)",
        report.video.display(),
        match decision.identifier() {
            Some(id) => format!("{} {}", decision, id),
            None => decision.to_string(),
        },
        ranked.len(),
        distance_candidates.len()
    );
    if let Some((top_id, fraction)) = majority_fraction(&distance_candidates) {
        trace!(target: "decision", "{}: most submitted identifier {} ({:.3})", report.video.display(), top_id, fraction);
    }

    Evaluation {
        video: report.video.clone(),
        summary: MatchSummary::new(decision.clone(), &ranked),
        decision,
    }
}

/// Evaluate reports in parallel. The output is in the same order as the input.
pub fn evaluate_reports(reports: &[MatchReport], cfg: &MatchCfg) -> Vec<Evaluation> {
    reports.par_iter().map(|report| evaluate_report(report, cfg)).collect()
}
