//! File system utilities for resource staging.
//!
//! Provides idempotent directory operations, replace-not-merge copies,
//! symlink preservation, and path-carrying errors.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io::{self},
    path::Path,
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("failed to create directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("failed to remove directory", path),
    }
}

/// Removes the file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("failed to remove file", path),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        crate::bail!("{from:?} does not exist");
    }
    if !from.is_file() {
        crate::bail!("{from:?} is not a file");
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("failed to create directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("failed to copy to", to)?;
    Ok(())
}

/// Replaces `to` with a copy of the regular file `from`.
///
/// Any existing file at `to` is removed first rather than overwritten.
pub async fn replace_file(from: &Path, to: &Path) -> Result<()> {
    remove_file(to).await?;
    copy_file(from, to).await
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them. Entries are visited in
/// file-name order. Returns the number of files (and symlinks) copied.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    if !from.exists() {
        crate::bail!("{from:?} does not exist");
    }
    if !from.is_dir() {
        crate::bail!("{from:?} is not a Directory");
    }

    // Clone paths for move into blocking closure
    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || -> Result<usize> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("failed to create directory", parent)?;
        }

        let mut copied = 0;
        for entry in walkdir::WalkDir::new(&from).sort_by_file_name() {
            let entry = entry?;
            debug_assert!(entry.path().starts_with(&from));
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target =
                    std::fs::read_link(entry.path()).fs_context("failed to read link", entry.path())?;
                let linked = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                linked.fs_context("failed to create symlink", &dest_path)?;
                copied += 1;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)
                    .fs_context("failed to create directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("failed to copy to", &dest_path)?;
                copied += 1;
            }
        }

        Ok(copied)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Replaces the directory `to` with a recursive copy of `from`.
///
/// The destination is removed entirely first, so afterwards it mirrors the
/// source with no files left over from earlier copies.
pub async fn replace_dir(from: &Path, to: &Path) -> Result<usize> {
    remove_dir_all(to).await?;
    copy_dir(from, to).await
}
