//! Shallow repository clones via the `git` binary.
//!
//! Clones are `--depth 1` (no history) into a per-run temp directory and
//! removed immediately after extraction to bound disk usage.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tracing::warn;

/// Clone `clone_url` into `dest` with `--depth 1`. Fails if `git` is not on
/// PATH or the clone exits non-zero.
pub async fn shallow_clone(clone_url: &str, dest: &Path) -> Result<()> {
    let output = tokio::process::Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg("1")
        .arg("--quiet")
        .arg(clone_url)
        .arg(dest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .context("failed to run `git clone` (is git installed?)")?;

    anyhow::ensure!(
        output.status.success(),
        "git clone failed for {clone_url}: {}",
        String::from_utf8_lossy(&output.stderr).trim()
    );
    Ok(())
}

/// `true` if a usable `git` binary is on PATH.
pub async fn git_available() -> bool {
    tokio::process::Command::new("git")
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Reset the temp clone directory: remove leftovers from a previous run and
/// recreate it empty.
pub fn prepare_temp_dir(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("failed to clear temp dir: {}", path.display()))?;
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create temp dir: {}", path.display()))?;
    Ok(())
}

/// Best-effort removal of a single cloned repository. A failure here only
/// costs disk space, so it is logged and swallowed.
pub fn remove_clone(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_dir_all(path) {
            warn!(path = %path.display(), error = %e, "could not remove clone dir");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_temp_dir_clears_previous_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("clones");
        std::fs::create_dir_all(dir.join("stale_repo")).unwrap();
        std::fs::write(dir.join("stale_repo/file.ts"), "old").unwrap();

        prepare_temp_dir(&dir).unwrap();

        assert!(dir.exists());
        assert!(!dir.join("stale_repo").exists());
    }

    #[test]
    fn remove_clone_is_silent_on_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        remove_clone(&tmp.path().join("never_created"));
    }
}
