pub mod definitions;
pub mod disambiguation;
pub mod errors;
pub mod file_set;
pub mod fingerprint;
mod lib_fns;
mod library_cfg;
mod match_report;
pub mod matches;
pub mod scoring;


//exports to app and tests
pub use disambiguation::Decision;
pub use errors::{LibError, ThresholdError};
pub(self) use file_set::FileSet;
pub use lib_fns::{evaluate_reports, load_reports, Evaluation};
pub use library_cfg::{MatchCfg, ScoringCfg, Thresholds};
pub use match_report::MatchReport;
pub use matches::MatchSummary;
pub use scoring::Candidate;
