mod candidate_scorer;

#[cfg(test)]
mod tests;

pub use candidate_scorer::{score_all, Candidate, CandidateInfo, QueryInfo};
