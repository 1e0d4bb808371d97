use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::library::{
    scoring::{CandidateInfo, QueryInfo},
    LibError,
};

/// Everything gathered about one video before a decision is made: the parsed query and the
/// search results returned for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub video: PathBuf,
    #[serde(default)]
    pub query: QueryInfo,
    #[serde(default)]
    pub candidates: Vec<CandidateInfo>,
}

impl MatchReport {
    pub fn load(path: &Path) -> Result<Self, LibError> {
        let file = File::open(path).map_err(|e| LibError::ReportIoError {
            src: format!("{}", e),
            path: path.to_path_buf(),
        })?;

        let mut report: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| LibError::ReportParseError {
                src: format!("{}", e),
                path: path.to_path_buf(),
            })?;

        //relative video paths are relative to the report
        if report.video.is_relative() {
            if let Some(parent) = path.parent() {
                report.video = parent.join(&report.video);
            }
        }

        Ok(report)
    }
}
