use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result};
use glob::glob;
use tracing::debug;

/// Filename prefix the portal gives bulk ad report downloads.
const REPORT_PREFIX: &str = "광고일괄보고서";

/// Find the newest report in `dir` by modification time. The download flow
/// (out of scope here) drops files straight into the working directory, so
/// "newest matching file" is the handoff contract.
pub fn latest_report(dir: &Path) -> Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for ext in ["csv", "xlsx"] {
        let pattern = dir.join(format!("{REPORT_PREFIX}*.{ext}"));
        let pattern = pattern
            .to_str()
            .context("report directory path is not valid UTF-8")?;
        for entry in glob(pattern).context("building report glob")? {
            let path = entry?;
            let modified = path
                .metadata()
                .and_then(|m| m.modified())
                .with_context(|| format!("reading mtime of {}", path.display()))?;
            if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
                newest = Some((modified, path));
            }
        }
    }

    match &newest {
        Some((_, path)) => debug!(path = %path.display(), "picked latest report"),
        None => debug!(dir = %dir.display(), "no report files found"),
    }
    Ok(newest.map(|(_, path)| path))
}
