use std::path::PathBuf;

use crate::library::MatchCfg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportVerbosity {
    VeryQuiet,
    Quiet,
    Default,
    Verbose,
}

/// Where files end up once a decision has been made about them.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingCfg {
    pub dest_dir: Option<PathBuf>,
    pub ambiguous_dir: Option<PathBuf>,
    pub failed_dir: Option<PathBuf>,
    pub name_template: String,
    pub write_summary: bool,
    pub dry_run: bool,
}

impl RoutingCfg {
    pub fn dirs(&self) -> impl Iterator<Item = (&'static str, &PathBuf)> {
        vec![
            ("--dest-dir", self.dest_dir.as_ref()),
            ("--ambiguous-dir", self.ambiguous_dir.as_ref()),
            ("--failed-dir", self.failed_dir.as_ref()),
        ]
        .into_iter()
        .filter_map(|(arg, dir)| dir.map(|dir| (arg, dir)))
    }

    pub fn moves_files(&self) -> bool {
        self.dirs().next().is_some()
    }
}

#[derive(Debug, Clone)]
pub struct OutputCfg {
    pub json_output: bool,
    pub verbosity: ReportVerbosity,
}

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub report_paths: Vec<PathBuf>,
    pub excl_paths: Vec<PathBuf>,

    pub match_cfg: MatchCfg,
    pub routing_cfg: RoutingCfg,
    pub output_cfg: OutputCfg,
}
