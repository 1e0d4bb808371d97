use std::path::PathBuf;

use thiserror::Error;

use crate::{
    app::router::RouteError,
    library::{LibError, ThresholdError},
};

#[derive(Error, Debug)]
pub enum AppError {
    /////////////////////////////////
    // Argument parsing
    #[error("Args file not found at {0}")]
    ArgsFileNotFound(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse args file at given location: {0}: {1}")]
    ArgsFileParse(PathBuf, String),

    #[error("could not parse value given to {arg}: {value}")]
    ParseArg { arg: &'static str, value: String },

    #[error("Invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),

    #[error("--duration-tolerance must be >= 0, got {0}")]
    NegativeDurationTolerance(f64),

    /////////////////////////////////
    //Routing directories. These are checked before any file is touched.
    #[error("Directory given to {arg} not found: {path}")]
    RoutingDirNotFound { arg: &'static str, path: PathBuf },

    #[error("Path given to {arg} is not a directory: {path}")]
    RoutingDirNotADir { arg: &'static str, path: PathBuf },

    #[error("Directory given to {inner_arg} ({inner}) is inside the directory given to {outer_arg} ({outer})")]
    NestedRoutingDirs {
        inner_arg: &'static str,
        inner: PathBuf,
        outer_arg: &'static str,
        outer: PathBuf,
    },

    /////////////////////////////////
    //Per-report problems
    #[error(transparent)]
    Lib(#[from] LibError),

    #[error("Failed to route {0}")]
    Route(PathBuf, #[source] RouteError),
}
