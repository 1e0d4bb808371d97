use std::{error::Error, io::BufWriter, path::Path};

use serde::Serialize;

use crate::{
    app::{router::RoutedFile, *},
    library::{evaluate_reports, file_set::is_ancestor_of, load_reports, Evaluation, MatchSummary},
};

pub fn run_app() -> i32 {
    //Parse arguments and bail early if there is an error.
    let cfg = match arg_parse::parse_args() {
        Ok(cfg) => {
            configure_logs(cfg.output_cfg.verbosity);
            cfg
        }
        Err(fatal) => {
            //Errors are reported using TermLogger, which is configured from the argument parser.
            //But if a fatal error occurred during parsing the logger would not be configured when
            //we attempt to print the fatal error. So if a fatal error occurs, start the logger
            //before returning the error.
            configure_logs(ReportVerbosity::Verbose);
            print_fatal_err(&fatal, ReportVerbosity::Verbose);
            return 1;
        }
    };

    match run_app_inner(&cfg) {
        Ok(nonfatal_errs) => {
            print_nonfatal_errs(nonfatal_errs);
            0
        }
        Err(fatal_error) => {
            print_fatal_err(&fatal_error, cfg.output_cfg.verbosity);
            1
        }
    }
}

fn run_app_inner(cfg: &AppCfg) -> Result<Vec<AppError>, AppError> {
    let mut nonfatal_errs: Vec<AppError> = vec![];

    //Nothing is moved until every routing directory has been checked.
    validate_routing_dirs(&cfg.routing_cfg)?;

    let (reports, load_errs) = load_reports(&cfg.report_paths, &cfg.excl_paths)?;
    nonfatal_errs.extend(load_errs.into_iter().map(AppError::from));

    //sanity check: Warn the user if no reports were found
    if reports.is_empty() {
        warn!(target: "reports", "No match reports were found at the paths given by --reports. Nothing to do.");
    }

    let evaluations = evaluate_reports(&reports, &cfg.match_cfg);

    //moves are done one at a time so that name collisions resolve deterministically
    let mut outcomes = Vec::with_capacity(evaluations.len());
    for eval in &evaluations {
        let routed = if cfg.routing_cfg.moves_files() || cfg.routing_cfg.write_summary {
            match router::route(eval, &cfg.routing_cfg) {
                Ok(routed) => Some(routed),
                Err(e) => {
                    nonfatal_errs.push(AppError::Route(eval.video.clone(), e));
                    None
                }
            }
        } else {
            None
        };
        outcomes.push((eval, routed));
    }

    print_results(&outcomes, &cfg.output_cfg);

    Ok(nonfatal_errs)
}

/// Routing dirs given by the user must exist (except the ambiguous dir, which is created on
/// demand), must be dirs, and must not be nested inside each other.
pub fn validate_routing_dirs(routing_cfg: &RoutingCfg) -> Result<(), AppError> {
    for (arg, dir) in routing_cfg.dirs() {
        let may_be_missing = arg == "--ambiguous-dir";
        if !dir.exists() {
            if may_be_missing {
                continue;
            }
            return Err(AppError::RoutingDirNotFound {
                arg,
                path: dir.to_path_buf(),
            });
        }
        if !dir.is_dir() {
            return Err(AppError::RoutingDirNotADir {
                arg,
                path: dir.to_path_buf(),
            });
        }
    }

    for (outer_arg, outer) in routing_cfg.dirs() {
        for (inner_arg, inner) in routing_cfg.dirs() {
            if outer_arg != inner_arg && is_ancestor_of(outer, inner) {
                return Err(AppError::NestedRoutingDirs {
                    inner_arg,
                    inner: inner.to_path_buf(),
                    outer_arg,
                    outer: outer.to_path_buf(),
                });
            }
        }
    }

    Ok(())
}

fn print_fatal_err(fatal_err: &AppError, verbosity: ReportVerbosity) {
    error!(target: "app-errorlog", "{}", fatal_err);

    if verbosity == ReportVerbosity::Verbose {
        let mut source: Option<&(dyn Error + 'static)> = fatal_err.source();
        while let Some(e) = source {
            error!(target: "app-errorlog", "    caused by: {}", e);
            source = e.source();
        }
    }
}

fn print_nonfatal_errs(nonfatal_errs: Vec<AppError>) {
    for err in nonfatal_errs {
        match err.source() {
            Some(source) => warn!("{}: {}", err, source),
            None => warn!("{}", err),
        }
    }
}

pub fn configure_logs(verbosity: ReportVerbosity) {
    use simplelog::*;

    let min_loglevel = match verbosity {
        ReportVerbosity::VeryQuiet => LevelFilter::Error,
        ReportVerbosity::Quiet => LevelFilter::Warn,
        ReportVerbosity::Default => LevelFilter::Info,
        ReportVerbosity::Verbose => LevelFilter::Trace,
    };

    //a logger can only be installed once per process. Ignore the error if one is already present.
    let _ = TermLogger::init(
        min_loglevel,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn print_results(outcomes: &[(&Evaluation, Option<RoutedFile>)], output_cfg: &OutputCfg) {
    if output_cfg.json_output {
        #[derive(Serialize)]
        struct JsonStruct<'a> {
            video: &'a Path,
            decision: String,
            identifier: Option<&'a str>,
            destination: Option<&'a Path>,
            summary: &'a MatchSummary,
        }

        let output_vec: Vec<JsonStruct> = outcomes
            .iter()
            .map(|(eval, routed)| JsonStruct {
                video: &eval.video,
                decision: eval.decision.to_string(),
                identifier: eval.decision.identifier(),
                destination: routed.as_ref().and_then(|r| r.destination.as_deref()),
                summary: &eval.summary,
            })
            .collect();

        let stdout = BufWriter::new(std::io::stdout());
        if let Err(e) = serde_json::to_writer_pretty(stdout, &output_vec) {
            error!(target: "app-errorlog", "Failed to write json output: {}", e);
        }
        println!();
    } else {
        for (eval, routed) in outcomes {
            let identifier = eval.decision.identifier().unwrap_or("-");
            match routed.as_ref().and_then(|r| r.destination.as_ref()) {
                Some(dest) => println!(
                    "{}\t{}\t{} -> {}",
                    eval.decision,
                    identifier,
                    eval.video.display(),
                    dest.display()
                ),
                None => println!("{}\t{}\t{}", eval.decision, identifier, eval.video.display()),
            }
        }
    }
}
