//! Copies a resolved resource source into its destinations.

use super::{Layout, ResourceKind};
use crate::bundler::error::{ErrorExt, ResourceIssue, Result};
use crate::bundler::utils::fs;
use std::path::{Path, PathBuf};

/// Result of staging one resource kind.
#[derive(Debug, Default)]
pub struct StageReport {
    /// Files copied across all destinations.
    pub files_copied: usize,
    /// Destinations that were written.
    pub staged: Vec<PathBuf>,
    /// Destinations that failed.
    pub issues: Vec<ResourceIssue>,
}

/// Stages `source` into every destination.
///
/// A failing destination is recorded in the report and does not stop the
/// others. A destination that is the source itself is left alone, and a
/// tree destination that contains the source or sits inside it is skipped
/// with an issue.
pub async fn stage(kind: ResourceKind, source: &Path, destinations: &[PathBuf]) -> StageReport {
    let mut report = StageReport::default();

    let resolved_source = resolve_path(source);

    for destination in destinations {
        let resolved_destination = resolve_path(destination);
        if resolved_destination == resolved_source {
            log::info!(
                "{} source is already at {}, leaving it in place",
                kind,
                destination.display()
            );
            continue;
        }
        if kind.layout() == Layout::Tree
            && (resolved_source.starts_with(&resolved_destination)
                || resolved_destination.starts_with(&resolved_source))
        {
            let issue = ResourceIssue::OverlapsSource {
                kind,
                path: destination.clone(),
                source_dir: source.to_path_buf(),
            };
            log::error!("{}", issue);
            report.issues.push(issue);
            continue;
        }

        let result = match kind.layout() {
            Layout::Flat => stage_flat(kind, source, destination).await,
            Layout::Tree => fs::replace_dir(source, destination).await,
        };

        match result {
            Ok(count) => {
                log::info!(
                    "Copied {} {} file(s) into {}",
                    count,
                    kind,
                    destination.display()
                );
                report.files_copied += count;
                report.staged.push(destination.clone());
            }
            Err(e) => {
                log::error!(
                    "Failed to stage {} into {}: {}",
                    kind,
                    destination.display(),
                    e
                );
                report.issues.push(ResourceIssue::CopyFailed {
                    kind,
                    path: destination.clone(),
                    source: Box::new(e),
                });
            }
        }
    }

    report
}

/// Copies each regular file directly inside `source` into `destination`.
async fn stage_flat(kind: ResourceKind, source: &Path, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination, false).await?;

    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(source)
        .await
        .fs_context("failed to read directory", source)?;
    while let Some(entry) = dir
        .next_entry()
        .await
        .fs_context("failed to read directory", source)?
    {
        entries.push(entry.path());
    }
    entries.sort();

    let mut copied = 0;
    for path in entries {
        let Some(name) = path.file_name() else {
            continue;
        };
        // metadata follows symlinks, so linked files are copied as files
        let metadata = tokio::fs::metadata(&path)
            .await
            .fs_context("failed to read metadata for", &path)?;
        if !metadata.is_file() {
            log::warn!("Skipping {} entry {}: not a file", kind, path.display());
            continue;
        }

        let target = destination.join(name);
        log::debug!("copying {} to {}", path.display(), destination.display());
        fs::replace_file(&path, &target).await?;
        copied += 1;
    }

    Ok(copied)
}

/// Canonical form of `path`, even when its tail does not exist yet.
///
/// The longest existing ancestor is canonicalized and the missing components
/// are appended back, so a destination that is about to be created still
/// compares correctly against the source.
fn resolve_path(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn flat_kinds_copy_files_only() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("img");
        let dst = tmp.path().join("Resources");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("knob.png"), "png").unwrap();
        std::fs::write(src.join("bg@2x.png"), "png2").unwrap();

        let report = stage(ResourceKind::Images, &src, &[dst.clone()]).await;

        assert_eq!(report.files_copied, 2);
        assert!(report.issues.is_empty());
        assert_eq!(listing(&dst), ["bg@2x.png", "knob.png"]);
    }

    #[tokio::test]
    async fn tree_kind_mirrors_source_on_restage() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("build-a");
        let second = tmp.path().join("build-b");
        let dst = tmp.path().join("Resources/web");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(first.join("old.js"), "a").unwrap();
        std::fs::write(second.join("index.html"), "b").unwrap();

        stage(ResourceKind::Web, &first, &[dst.clone()]).await;
        let report = stage(ResourceKind::Web, &second, &[dst.clone()]).await;

        assert!(report.issues.is_empty());
        assert_eq!(listing(&dst), ["index.html"]);
    }

    #[tokio::test]
    async fn failing_destination_does_not_stop_others() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("fonts");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("Roboto.ttf"), "ttf").unwrap();

        // a regular file where a directory is expected
        let blocked = tmp.path().join("blocked");
        std::fs::write(&blocked, "file").unwrap();
        let good = tmp.path().join("good");

        let report = stage(ResourceKind::Fonts, &src, &[blocked.clone(), good.clone()]).await;

        assert_eq!(report.issues.len(), 1);
        assert!(matches!(
            &report.issues[0],
            ResourceIssue::CopyFailed { path, .. } if path == &blocked
        ));
        assert_eq!(report.staged, vec![good.clone()]);
        assert_eq!(listing(&good), ["Roboto.ttf"]);
    }

    #[tokio::test]
    async fn destination_holding_the_source_is_left_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let web = tmp.path().join("resources/web");
        let dist = web.join("dist");
        let bundle = tmp.path().join("Resources/web");
        std::fs::create_dir_all(&dist).unwrap();
        std::fs::write(dist.join("index.html"), "ui").unwrap();

        let report = stage(ResourceKind::Web, &dist, &[web.clone(), bundle.clone()]).await;

        assert_eq!(report.issues.len(), 1);
        assert!(matches!(
            &report.issues[0],
            ResourceIssue::OverlapsSource { path, .. } if path == &web
        ));
        assert_eq!(listing(&dist), ["index.html"]);
        assert_eq!(report.staged, vec![bundle.clone()]);
        assert_eq!(listing(&bundle), ["index.html"]);
    }

    #[tokio::test]
    async fn destination_inside_the_source_is_not_created() {
        let tmp = tempfile::tempdir().unwrap();
        let web = tmp.path().join("web");
        std::fs::create_dir_all(&web).unwrap();
        std::fs::write(web.join("index.html"), "ui").unwrap();
        let nested = web.join("mirror/web");

        let report = stage(ResourceKind::Web, &web, &[nested]).await;

        assert!(matches!(
            report.issues.as_slice(),
            [ResourceIssue::OverlapsSource { .. }]
        ));
        assert_eq!(listing(&web), ["index.html"]);
    }

    #[tokio::test]
    async fn source_is_never_replaced_by_itself() {
        let tmp = tempfile::tempdir().unwrap();
        let web = tmp.path().join("resources/web");
        std::fs::create_dir_all(&web).unwrap();
        std::fs::write(web.join("index.html"), "ui").unwrap();

        let report = stage(ResourceKind::Web, &web, &[web.clone()]).await;

        assert!(report.staged.is_empty());
        assert_eq!(listing(&web), ["index.html"]);
    }
}
