use std::path::{Path, PathBuf};

use thiserror::Error;
use RouteError::*;

use crate::{
    app::RoutingCfg,
    library::{Candidate, Decision, Evaluation, LibError, MatchSummary},
};

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Source file does not exist: {0}")]
    SourceFileMissing(PathBuf),

    #[error("Failed to create directory {0}")]
    CreateDirFailure(PathBuf, #[source] std::io::Error),

    #[error("Failed to copy {0} to {1}")]
    CopyFailure(PathBuf, PathBuf, #[source] std::io::Error),

    #[error("Failed to delete file: {0}")]
    DeleteFailure(PathBuf, #[source] std::io::Error),

    #[error("Failed to move {0} to {1}")]
    RenameFailure(PathBuf, PathBuf, #[source] std::io::Error),

    #[error("Cannot derive a file name for {0}")]
    NoFileName(PathBuf),

    #[error(transparent)]
    Summary(#[from] LibError),
}

/// What happened (or, in a dry run, would have happened) to one video.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedFile {
    pub video: PathBuf,
    pub destination: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

/// Where a video should go for its decision. `None` means it stays where it is.
pub fn destination_for(eval: &Evaluation, cfg: &RoutingCfg) -> Result<Option<PathBuf>, RouteError> {
    let dest = match &eval.decision {
        Decision::Accept(_) => match &cfg.dest_dir {
            Some(dest_dir) => {
                let rendered = eval
                    .accepted_candidate()
                    .map(|candidate| render_name(&cfg.name_template, candidate, &eval.video));
                let name = match rendered {
                    Some(name) if is_plain_file_name(&name) => PathBuf::from(name),
                    Some(name) => {
                        warn!(target: "routing", "Name template gave unusable name {:?} for {}, keeping the original name", name, eval.video.display());
                        file_name(&eval.video)?
                    }
                    None => file_name(&eval.video)?,
                };
                Some(dest_dir.join(name))
            }
            None => None,
        },
        Decision::Ambiguous => match cfg.ambiguous_dir.as_ref().or_else(|| cfg.failed_dir.as_ref()) {
            Some(dir) => Some(dir.join(file_name(&eval.video)?)),
            None => None,
        },
        Decision::Reject => match &cfg.failed_dir {
            Some(dir) => Some(dir.join(file_name(&eval.video)?)),
            None => None,
        },
    };

    Ok(dest)
}

pub fn route(eval: &Evaluation, cfg: &RoutingCfg) -> Result<RoutedFile, RouteError> {
    let planned = destination_for(eval, cfg)?;

    if cfg.dry_run {
        match &planned {
            Some(dest) => info!(target: "routing", "[dry run] {} {} ------> {}", eval.decision, eval.video.display(), dest.display()),
            None => info!(target: "routing", "[dry run] {} {} (left in place)", eval.decision, eval.video.display()),
        }
        return Ok(RoutedFile {
            video: eval.video.clone(),
            destination: planned,
            summary: None,
        });
    }

    let destination = match &planned {
        Some(dest) => {
            info!(target: "routing", "{}: {} ------> {}", eval.decision, eval.video.display(), dest.display());
            Some(move_path(&eval.video, dest)?)
        }
        None => None,
    };

    let summary = if cfg.write_summary {
        let beside = destination.as_deref().unwrap_or_else(|| eval.video.as_path());
        let summary_path = MatchSummary::path_for(beside);
        eval.summary.write_to(&summary_path)?;
        debug!(target: "routing", "Wrote summary {}", summary_path.display());
        Some(summary_path)
    } else {
        None
    };

    Ok(RoutedFile {
        video: eval.video.clone(),
        destination,
        summary,
    })
}

/// Fill the `{site}`, `{date}`, `{name}` and `{ext}` placeholders of `template`.
pub fn render_name(template: &str, candidate: &Candidate, video: &Path) -> String {
    fn clean(value: &str) -> String {
        value.trim().replace(|c: char| c == '/' || c == '\\', "_")
    }

    let ext = video.extension().map(|e| e.to_string_lossy().to_string()).unwrap_or_default();

    let rendered = template
        .replace("{site}", &clean(&candidate.site))
        .replace("{date}", &clean(candidate.date.as_deref().unwrap_or_default()))
        .replace("{name}", &clean(&candidate.title))
        .replace("{ext}", &clean(&ext));

    rendered.trim().trim_end_matches('.').to_string()
}

//a rendered name must stay inside the destination dir
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}

fn file_name(video: &Path) -> Result<PathBuf, RouteError> {
    video
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| NoFileName(video.to_path_buf()))
}

fn delete_path(path: &Path) -> Result<(), RouteError> {
    std::fs::remove_file(path).map_err(|e| DeleteFailure(path.to_path_buf(), e))
}

/// Move `source` to `dest`, never overwriting. Returns the path actually used.
pub fn move_path(source: &Path, dest: &Path) -> Result<PathBuf, RouteError> {
    if !source.exists() {
        return Err(SourceFileMissing(source.to_path_buf()));
    }

    if let Some(parent_dir) = dest.parent() {
        std::fs::create_dir_all(parent_dir).map_err(|e| CreateDirFailure(parent_dir.to_path_buf(), e))?;
    }

    let dest = free_path_for(dest);

    if let Err(e) = std::fs::rename(source, &dest) {
        match e.raw_os_error() {
            Some(libc::EPERM) | Some(libc::EXDEV) => {
                //try copy and delete.
                debug!(target: "routing", "Unable to move. Performing copy and delete instead.");
                std::fs::copy(source, &dest).map_err(|e| CopyFailure(source.to_path_buf(), dest.clone(), e))?;
                delete_path(source)?;
            }
            _ => return Err(RenameFailure(source.to_path_buf(), dest, e)),
        }
    }

    Ok(dest)
}

//a routed video never replaces an existing file. When `p` is taken, the first free
//"<stem> (n).<ext>" next to it is used instead. Stems may contain dots ("Vol. 2"), so the
//whole name is built at once rather than through set_extension.
fn free_path_for(p: &Path) -> PathBuf {
    let stem = p.file_stem().unwrap_or_default();
    let extension = p.extension();

    let mut ret = p.to_path_buf();
    let mut counter = 1u64;
    while ret.exists() {
        let mut new_name = stem.to_os_string();
        new_name.push(format!(" ({})", counter));
        if let Some(extension) = extension {
            new_name.push(".");
            new_name.push(extension);
        }
        ret.set_file_name(new_name);

        counter += 1;
    }

    ret
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::library::{definitions::DEFAULT_NAME_TEMPLATE, MatchSummary};

    fn candidate(identifier: &str) -> Candidate {
        Candidate {
            identifier: identifier.to_string(),
            title: "Beach Day".to_string(),
            site: "Brand".to_string(),
            date: Some("2022-02-02".to_string()),
            hash_distance: Some(2),
            duration_agrees: Some(true),
            name_match: 100.0,
            site_match: true,
            date_match: true,
        }
    }

    fn evaluation(video: &Path, decision: Decision) -> Evaluation {
        Evaluation {
            video: video.to_path_buf(),
            summary: MatchSummary::new(decision.clone(), &[candidate("A")]),
            decision,
        }
    }

    fn cfg(root: &Path) -> RoutingCfg {
        RoutingCfg {
            dest_dir: Some(root.join("dest")),
            ambiguous_dir: Some(root.join("ambiguous")),
            failed_dir: Some(root.join("failed")),
            name_template: DEFAULT_NAME_TEMPLATE.to_string(),
            write_summary: false,
            dry_run: false,
        }
    }

    fn video(root: &Path, name: &str) -> PathBuf {
        let p = root.join("incoming").join(name);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, b"video").unwrap();
        p
    }

    #[test]
    fn test_render_name() {
        let c = candidate("A");
        assert_eq!(
            render_name(DEFAULT_NAME_TEMPLATE, &c, Path::new("x.mp4")),
            "Brand - 2022-02-02 - Beach Day.mp4"
        );

        let mut c = candidate("A");
        c.title = "AC/DC\\live".to_string();
        assert_eq!(render_name("{name}.{ext}", &c, Path::new("x.mkv")), "AC_DC_live.mkv");

        assert_eq!(render_name("{name}.{ext}", &c, Path::new("noext")), "AC_DC_live");
    }

    #[test]
    fn test_accept_moves_to_dest() {
        let dir = tempfile::tempdir().unwrap();
        let v = video(dir.path(), "raw.mp4");

        let routed = route(&evaluation(&v, Decision::Accept("A".to_string())), &cfg(dir.path())).unwrap();

        let expected = dir.path().join("dest").join("Brand - 2022-02-02 - Beach Day.mp4");
        assert_eq!(routed.destination, Some(expected.clone()));
        assert!(expected.exists());
        assert!(!v.exists());
    }

    #[test]
    //nothing is ever overwritten
    fn test_collisions_get_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let c = cfg(dir.path());

        let first = route(&evaluation(&video(dir.path(), "a.mp4"), Decision::Reject), &c).unwrap();
        let second = route(&evaluation(&video(dir.path(), "a.mp4"), Decision::Reject), &c).unwrap();

        assert_eq!(first.destination, Some(dir.path().join("failed").join("a.mp4")));
        assert_eq!(second.destination, Some(dir.path().join("failed").join("a (1).mp4")));
    }

    #[test]
    fn test_collisions_with_dotted_title() {
        let dir = tempfile::tempdir().unwrap();
        let c = cfg(dir.path());

        let mut routed = vec![];
        for raw in &["a.mp4", "b.mp4", "c.mp4"] {
            let mut eval = evaluation(&video(dir.path(), raw), Decision::Accept("A".to_string()));
            eval.summary.candidates[0].candidate.title = "Vol. 2".to_string();
            routed.push(route(&eval, &c).unwrap().destination.unwrap());
        }

        let dest = dir.path().join("dest");
        assert_eq!(
            routed,
            vec![
                dest.join("Brand - 2022-02-02 - Vol. 2.mp4"),
                dest.join("Brand - 2022-02-02 - Vol. 2 (1).mp4"),
                dest.join("Brand - 2022-02-02 - Vol. 2 (2).mp4"),
            ]
        );
        assert!(routed.iter().all(|p| p.exists()));
    }

    #[test]
    //names that would leave the destination dir fall back to the original file name
    fn test_unusable_rendered_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = cfg(dir.path());
        c.name_template = "{name}".to_string();

        for (raw, title) in &[("a.mp4", ""), ("b.mp4", ".."), ("c.mp4", "...")] {
            let mut eval = evaluation(&video(dir.path(), raw), Decision::Accept("A".to_string()));
            eval.summary.candidates[0].candidate.title = title.to_string();

            let routed = route(&eval, &c).unwrap();
            let expected = dir.path().join("dest").join(raw);
            assert_eq!(routed.destination, Some(expected.clone()), "title {:?}", title);
            assert!(expected.is_file());
        }
    }

    #[test]
    fn test_ambiguous_routing() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = cfg(dir.path());

        //created on demand
        let routed = route(&evaluation(&video(dir.path(), "a.mp4"), Decision::Ambiguous), &c).unwrap();
        assert_eq!(routed.destination, Some(dir.path().join("ambiguous").join("a.mp4")));

        //falls back to the failed dir
        c.ambiguous_dir = None;
        let routed = route(&evaluation(&video(dir.path(), "b.mp4"), Decision::Ambiguous), &c).unwrap();
        assert_eq!(routed.destination, Some(dir.path().join("failed").join("b.mp4")));

        //or stays put
        c.failed_dir = None;
        let v = video(dir.path(), "c.mp4");
        let routed = route(&evaluation(&v, Decision::Ambiguous), &c).unwrap();
        assert_eq!(routed.destination, None);
        assert!(v.exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = cfg(dir.path());
        c.dry_run = true;
        c.write_summary = true;

        let v = video(dir.path(), "a.mp4");
        let routed = route(&evaluation(&v, Decision::Reject), &c).unwrap();

        assert_eq!(routed.destination, Some(dir.path().join("failed").join("a.mp4")));
        assert_eq!(routed.summary, None);
        assert!(v.exists());
        assert!(!dir.path().join("failed").exists());
    }

    #[test]
    fn test_summary_written_beside_moved_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = cfg(dir.path());
        c.write_summary = true;

        let routed = route(&evaluation(&video(dir.path(), "a.mp4"), Decision::Reject), &c).unwrap();

        let expected = dir.path().join("failed").join("a_namer.summary.json");
        assert_eq!(routed.summary, Some(expected.clone()));
        assert!(expected.exists());
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.mp4");

        let res = route(&evaluation(&missing, Decision::Reject), &cfg(dir.path()));
        assert!(matches!(res, Err(SourceFileMissing(_))));
    }
}
