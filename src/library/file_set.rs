use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    result::Result,
};

use itertools::{Either::*, Itertools};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

use crate::library::definitions::{REPORT_EXTENSION, SUMMARY_FILE_SUFFIX};

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FileSetError {
    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("File enumeration failed: {0}")]
    EnumerationError(String),
}

impl From<walkdir::Error> for FileSetError {
    fn from(e: walkdir::Error) -> Self {
        Self::EnumerationError(format!("{}", e))
    }
}

/// The set of match reports found under some source paths, minus anything under the
/// excluded paths.
pub struct FileSet {
    source_paths: Vec<PathBuf>,
    excl_paths: Vec<PathBuf>,
}

impl FileSet {
    pub fn new(
        source_paths: impl IntoIterator<Item = impl AsRef<Path>>,
        excl_paths: impl IntoIterator<Item = impl AsRef<Path>>,
    ) -> Self {
        let source_paths = source_paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();

        let excl_paths = excl_paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();

        Self {
            source_paths,
            excl_paths,
        }
    }

    /// Walk the source paths. Unreadable directory entries are returned as non-fatal errors
    /// alongside the paths that were found.
    pub fn enumerate_from_fs(&self) -> Result<(Vec<PathBuf>, Vec<FileSetError>), FileSetError> {
        use FileSetError::*;

        //we will return a fatal error if any directory/file that the user
        //has specified does not exist.
        for path in self.source_paths.iter().chain(self.excl_paths.iter()) {
            if !path.exists() {
                return Err(PathNotFoundError(path.to_owned()));
            }
        }

        let paths_to_enumerate =
            self.source_paths
                .iter()
                .flat_map(WalkDir::new)
                .filter(|dir_entry_res| match &dir_entry_res {
                    Ok(dir_entry) => self.should_keep(dir_entry.path()),
                    Err(_) => true,
                });

        let (mut enumerated_paths, loading_errors): (Vec<PathBuf>, Vec<FileSetError>) =
            paths_to_enumerate.partition_map(|dir_entry_res| match dir_entry_res {
                Ok(dir_entry) => Left(dir_entry.path().to_path_buf()),
                Err(e) => Right(e.into()),
            });

        //sort is required for deterministic outputs.
        enumerated_paths.sort();
        enumerated_paths.dedup();

        Ok((enumerated_paths, loading_errors))
    }

    fn should_keep(&self, path: &Path) -> bool {
        path.is_file() && !any_item_includes(&self.excl_paths, path) && is_match_report(path)
    }
}

/// Match reports are json files. Summaries written by a previous run are json too, and are
/// skipped.
pub fn is_match_report(path: &Path) -> bool {
    let is_json = path
        .extension()
        .map(OsStr::to_string_lossy)
        .unwrap_or_default()
        .to_lowercase()
        == REPORT_EXTENSION;

    let is_summary = path
        .file_name()
        .map(OsStr::to_string_lossy)
        .unwrap_or_default()
        .ends_with(SUMMARY_FILE_SUFFIX);

    is_json && !is_summary
}

pub fn is_ancestor_of(reference: impl AsRef<Path>, cand: impl AsRef<Path>) -> bool {
    cand.as_ref().ancestors().any(|anc| reference.as_ref() == anc)
}

fn any_item_includes(references: impl IntoIterator<Item = impl AsRef<Path>>, cand: impl AsRef<Path>) -> bool {
    references.into_iter().any(|r| is_ancestor_of(r, &cand))
}
