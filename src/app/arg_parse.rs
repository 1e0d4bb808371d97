use std::{iter::once, path::PathBuf, str::FromStr};

use crate::{
    app::*,
    library::{
        definitions::{DEFAULT_DURATION_TOLERANCE, DEFAULT_NAME_TEMPLATE, DEFAULT_THRESHOLDS},
        MatchCfg, ScoringCfg, Thresholds,
    },
};

const REPORT_PATHS: &str = "Match report paths";
const EXCL_PATHS: &str = "Exclude file paths";
const ARGS_FILE: &str = "Args file";
const ACCEPT_DISTANCE: &str = "Accept distance";
const AMBIGUOUS_MIN: &str = "Ambiguous min";
const AMBIGUOUS_MAX: &str = "Ambiguous max";
const DISTANCE_MARGIN_ACCEPT: &str = "Distance margin accept";
const MAJORITY_ACCEPT_FRACTION: &str = "Majority accept fraction";
const DURATION_TOLERANCE: &str = "Duration tolerance";
const DEST_DIR: &str = "Destination dir";
const AMBIGUOUS_DIR: &str = "Ambiguous dir";
const FAILED_DIR: &str = "Failed dir";
const NAME_TEMPLATE: &str = "Name template";
const WRITE_SUMMARY: &str = "Write summary";
const DRY_RUN: &str = "Dry run";
const JSON_OUTPUT: &str = "Json output";
const QUIET: &str = "Quiet";
const VERY_QUIET: &str = "Very quiet";
const VERBOSE: &str = "Verbose";

pub fn parse_args() -> Result<AppCfg, AppError> {
    let mut matches = build_clap_app().get_matches();

    //first check if a Args file is present. If so, then read it and use the arguments from within.
    if let Some(args_fname) = matches.value_of_os(ARGS_FILE) {
        let args_fname = PathBuf::from(args_fname);
        let args = match std::fs::read_to_string(&args_fname) {
            Ok(args) => args,
            Err(e) => return Err(AppError::ArgsFileNotFound(args_fname, e)),
        };

        //now strip comments from the args file
        let args_file_contents = match comment::shell::strip(args) {
            Ok(args_file_contents) => args_file_contents,
            Err(e) => return Err(AppError::ArgsFileParse(args_fname, e.to_string())),
        };

        //the arguments file needs to be split into args in the same way as the shell would do it.
        let args = match shell_words::split(&args_file_contents) {
            Ok(args) => args,
            Err(e) => return Err(AppError::ArgsFileParse(args_fname, e.to_string())),
        };

        //slight bodge: need to prepend program name to as this is what would be seen in a direct shell invocation.
        let program_name = "vid_namer".to_string();
        let args = once(program_name).chain(args);

        matches = build_clap_app().get_matches_from(args);
    }

    cfg_from_matches(&matches)
}

fn build_clap_app() -> clap::App<'static, 'static> {
    //args are not added through method chaining because this appears to break rustfmt.
    let mut clap_app = clap::App::new("Video namer")
        .version("0.1")
        .author("me")
        .about("Decides which remote scene a video file is, from precomputed perceptual hash match reports, and files it accordingly");

    clap_app = clap_app.arg(
        clap::Arg::with_name(REPORT_PATHS)
            .long("reports")
            .required_unless(ARGS_FILE)
            .multiple(true)
            .min_values(1)
            .takes_value(true)
            .help("Match report files, or directories that will be searched for match reports (*.json)")
            .display_order(1),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(EXCL_PATHS)
            .short("x")
            .long("excl")
            .multiple(true)
            .min_values(1)
            .takes_value(true)
            .help("Paths to be ignored")
            .display_order(2),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(ARGS_FILE)
            .long("args-file")
            .takes_value(true)
            .help("Read command line arguments from a file")
            .conflicts_with_all(&[REPORT_PATHS]),
    );

    ///////////////////////////////
    // Thresholds
    clap_app = clap_app.arg(
        clap::Arg::with_name(ACCEPT_DISTANCE)
            .long("accept-distance")
            .takes_value(true)
            .allow_hyphen_values(true)
            .help("Largest hash distance at which a single dominant candidate is accepted [default: 6]"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(AMBIGUOUS_MIN)
            .long("ambiguous-min")
            .takes_value(true)
            .allow_hyphen_values(true)
            .help("Smallest hash distance treated as ambiguous [default: 7]"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(AMBIGUOUS_MAX)
            .long("ambiguous-max")
            .takes_value(true)
            .allow_hyphen_values(true)
            .help("Largest hash distance treated as ambiguous. Anything further is rejected [default: 12]"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(DISTANCE_MARGIN_ACCEPT)
            .long("distance-margin-accept")
            .takes_value(true)
            .allow_hyphen_values(true)
            .help("Gap between the best and second best distance needed to accept without a majority vote [default: 3]"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(MAJORITY_ACCEPT_FRACTION)
            .long("majority-accept-fraction")
            .takes_value(true)
            .allow_hyphen_values(true)
            .help("Fraction of all submissions that must agree on the best candidate to accept it despite a small margin [default: 0.7]"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(DURATION_TOLERANCE)
            .long("duration-tolerance")
            .takes_value(true)
            .allow_hyphen_values(true)
            .help("Seconds by which a candidate's duration may differ from the video's [default: 0]"),
    );

    ///////////////////////////////
    // Routing
    clap_app = clap_app.arg(
        clap::Arg::with_name(DEST_DIR)
            .long("dest-dir")
            .takes_value(true)
            .help("Accepted videos are renamed into this directory"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(AMBIGUOUS_DIR)
            .long("ambiguous-dir")
            .takes_value(true)
            .help("Ambiguous videos are moved here for manual review (created if missing). Defaults to --failed-dir"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(FAILED_DIR)
            .long("failed-dir")
            .takes_value(true)
            .help("Videos with no plausible match are moved here"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(NAME_TEMPLATE)
            .long("name-template")
            .takes_value(true)
            .help("File name for accepted videos. Placeholders: {site} {date} {name} {ext} [default: \"{site} - {date} - {name}.{ext}\"]"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(WRITE_SUMMARY)
            .long("write-summary")
            .help("Write a json summary of the match attempt beside each video"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(DRY_RUN)
            .long("dry-run")
            .help("Print what would be moved, but do not touch the filesystem"),
    );

    ///////////////////////////////
    // Output
    clap_app = clap_app.arg(
        clap::Arg::with_name(JSON_OUTPUT)
            .long("json-output")
            .help("Print outputs in json format"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(QUIET)
            .long("quiet")
            .help("Quiet verbosity: Only print errors, warnings and output")
            .conflicts_with_all(&[VERY_QUIET, VERBOSE]),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(VERY_QUIET)
            .long("quiet-quiet")
            .help("Very quiet verbosity: Only print errors and output")
            .conflicts_with(VERBOSE),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(VERBOSE)
            .long("verbose")
            .help("Print every decision and its reasoning"),
    );

    clap_app
}

fn parse_or<T: FromStr>(matches: &clap::ArgMatches, name: &str, arg: &'static str, default: T) -> Result<T, AppError> {
    match matches.value_of(name) {
        Some(value) => value.parse().map_err(|_e| AppError::ParseArg {
            arg,
            value: value.to_string(),
        }),
        None => Ok(default),
    }
}

fn cfg_from_matches(matches: &clap::ArgMatches) -> Result<AppCfg, AppError> {
    let report_paths = match matches.values_of_os(REPORT_PATHS) {
        Some(report_paths) => report_paths.map(PathBuf::from).collect(),
        None => vec![],
    };

    let excl_paths = match matches.values_of_os(EXCL_PATHS) {
        Some(excl_paths) => excl_paths.map(PathBuf::from).collect(),
        None => vec![],
    };

    let thresholds = Thresholds::from_signed(
        parse_or(matches, ACCEPT_DISTANCE, "--accept-distance", DEFAULT_THRESHOLDS.accept_distance as i64)?,
        parse_or(matches, AMBIGUOUS_MIN, "--ambiguous-min", DEFAULT_THRESHOLDS.ambiguous_min as i64)?,
        parse_or(matches, AMBIGUOUS_MAX, "--ambiguous-max", DEFAULT_THRESHOLDS.ambiguous_max as i64)?,
        parse_or(
            matches,
            DISTANCE_MARGIN_ACCEPT,
            "--distance-margin-accept",
            DEFAULT_THRESHOLDS.distance_margin_accept as i64,
        )?,
        parse_or(
            matches,
            MAJORITY_ACCEPT_FRACTION,
            "--majority-accept-fraction",
            DEFAULT_THRESHOLDS.majority_accept_fraction,
        )?,
    )?;

    let duration_tolerance = parse_or(
        matches,
        DURATION_TOLERANCE,
        "--duration-tolerance",
        DEFAULT_DURATION_TOLERANCE,
    )?;
    if duration_tolerance.is_nan() || duration_tolerance < 0.0 {
        return Err(AppError::NegativeDurationTolerance(duration_tolerance));
    }

    let match_cfg = MatchCfg {
        thresholds,
        scoring: ScoringCfg { duration_tolerance },
    };

    let routing_cfg = RoutingCfg {
        dest_dir: matches.value_of_os(DEST_DIR).map(PathBuf::from),
        ambiguous_dir: matches.value_of_os(AMBIGUOUS_DIR).map(PathBuf::from),
        failed_dir: matches.value_of_os(FAILED_DIR).map(PathBuf::from),
        name_template: matches
            .value_of(NAME_TEMPLATE)
            .unwrap_or(DEFAULT_NAME_TEMPLATE)
            .to_string(),
        write_summary: matches.is_present(WRITE_SUMMARY),
        dry_run: matches.is_present(DRY_RUN),
    };

    let verbosity = if matches.is_present(VERY_QUIET) {
        ReportVerbosity::VeryQuiet
    } else if matches.is_present(QUIET) {
        ReportVerbosity::Quiet
    } else if matches.is_present(VERBOSE) {
        ReportVerbosity::Verbose
    } else {
        ReportVerbosity::Default
    };

    let output_cfg = OutputCfg {
        json_output: matches.is_present(JSON_OUTPUT),
        verbosity,
    };

    let ret = AppCfg {
        report_paths,
        excl_paths,
        match_cfg,
        routing_cfg,
        output_cfg,
    };

    Ok(ret)
}
