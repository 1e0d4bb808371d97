mod candidate_group;
mod match_summary;


pub use candidate_group::{group_by_identifier, tally_identifiers, CandidateGroup};
pub use match_summary::MatchSummary;
