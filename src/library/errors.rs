use std::{fmt::Debug, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::file_set::FileSetError;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum LibError {
    #[error("Failed to read match report {path}: {src}")]
    ReportIoError { src: String, path: PathBuf },

    #[error("Failed to parse match report {path}: {src}")]
    ReportParseError { src: String, path: PathBuf },

    #[error("Failed to write match summary {path}: {src}")]
    SummaryWriteError { src: String, path: PathBuf },

    #[error("Match report enumeration failed: {0}")]
    EnumerationError(#[from] FileSetError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("{name} must be >= 0, got {value}")]
    Negative { name: &'static str, value: i64 },

    #[error("{name} is too large: {value}")]
    TooLarge { name: &'static str, value: i64 },

    #[error("majority_accept_fraction must be within [0.0, 1.0], got {0}")]
    FractionOutOfRange(f64),

    #[error("accept_distance ({accept_distance}) must be less than ambiguous_min ({ambiguous_min})")]
    AcceptNotBelowAmbiguous { accept_distance: u32, ambiguous_min: u32 },

    #[error("ambiguous_min ({ambiguous_min}) must be less than or equal to ambiguous_max ({ambiguous_max})")]
    AmbiguousBandInverted { ambiguous_min: u32, ambiguous_max: u32 },
}
