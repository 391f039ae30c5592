//! Source tree walk and filtered copy.
//!
//! Only `*.lua` files are installed. Hidden directories and symlinked
//! directories are never entered.
//! In minimal mode files whose name contains `.doc` are left out as well.
//! Failures on single entries are logged and collected in the
//! [`InstallReport`]; they never stop the walk.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, error, info};

use crate::{Error, Result};

/// Target of the per-entry `src -> dst` events, see `--verbose`.
pub const PROGRESS_TARGET: &str = "tree_install::progress";
/// Target of the events for skipped hidden or documentation entries, see
/// `--debug-ignored`.
pub const IGNORED_TARGET: &str = "tree_install::ignored";

const INSTALLED_EXTENSION: &str = "lua";
const DOC_MARKER: &str = ".doc";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstallOptions {
    /// Leave out documentation files.
    pub minimal: bool,
}

#[derive(Debug)]
pub struct InstallError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

/// Counters and per-entry failures for one [`install`] run.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Directory and file entries looked at.
    pub scanned: u64,
    pub copied: u64,
    pub dirs_created: u64,
    /// Hidden directories, and documentation in minimal mode.
    pub ignored: u64,
    /// Files that are not installed at all, and special files.
    pub skipped: u64,
    pub errors: Vec<InstallError>,
}

impl InstallReport {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn add_error(&mut self, path: &Path, source: io::Error) {
        error!("{}: {source}", path.display());
        self.errors.push(InstallError { path: path.to_path_buf(), source });
    }
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scanned={} copied={} dirs_created={} ignored={} skipped={} errors={}",
            self.scanned,
            self.copied,
            self.dirs_created,
            self.ignored,
            self.skipped,
            self.error_count()
        )
    }
}

struct InstallContext {
    options: InstallOptions,
    report: InstallReport,
}

/// Mirrors the installable part of `source_root` into `install_root`.
///
/// Only a missing source root is an error here; everything below it ends up
/// in the report.
pub fn install(
    source_root: &Path,
    install_root: &Path,
    options: &InstallOptions,
) -> Result<InstallReport> {
    if !source_root.is_dir() {
        return Err(Error::SourceRootNotDirectory(source_root.to_path_buf()));
    }

    let mut ctx = InstallContext { options: *options, report: InstallReport::default() };
    walk_directory(source_root, install_root, &mut ctx);

    info!(target: PROGRESS_TARGET, "installed {}", ctx.report);
    Ok(ctx.report)
}

fn walk_directory(src_dir: &Path, dst_dir: &Path, ctx: &mut InstallContext) {
    let entries = match fs::read_dir(src_dir) {
        Ok(it) => it,
        Err(err) => {
            ctx.report.add_error(src_dir, err);
            return;
        }
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(it) => it,
            Err(err) => {
                ctx.report.add_error(src_dir, err);
                continue;
            }
        };
        ctx.report.scanned += 1;

        let path = entry.path();
        let is_symlink = entry.file_type().is_ok_and(|it| it.is_symlink());
        // A link to a directory is mirrored as a directory but never walked.
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => dirs.push((entry.file_name(), path, !is_symlink)),
            Ok(meta) if meta.is_file() => files.push((entry.file_name(), path)),
            Ok(_) => ctx.report.skipped += 1,
            Err(err) => ctx.report.add_error(&path, err),
        }
    }

    dirs.sort();
    files.sort();

    for (name, src, descend) in dirs {
        let dst = dst_dir.join(&name);
        if name.to_string_lossy().starts_with('.') {
            debug!(target: IGNORED_TARGET, "ignored {}", src.display());
            ctx.report.ignored += 1;
            continue;
        }
        if handle_dir_entry(&src, &dst, ctx) && descend {
            walk_directory(&src, &dst, ctx);
        }
    }

    for (name, src) in files {
        let dst = dst_dir.join(&name);
        handle_file_entry(&name.to_string_lossy(), &src, &dst, ctx);
    }
}

/// Returns whether the directory should be descended into.
fn handle_dir_entry(src: &Path, dst: &Path, ctx: &mut InstallContext) -> bool {
    info!(target: PROGRESS_TARGET, "{} -> {}", src.display(), dst.display());
    match fs::create_dir(dst) {
        Ok(()) => {
            ctx.report.dirs_created += 1;
            true
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dst.is_dir() => true,
        Err(err) => {
            ctx.report.add_error(dst, err);
            false
        }
    }
}

fn handle_file_entry(name: &str, src: &Path, dst: &Path, ctx: &mut InstallContext) {
    if ctx.options.minimal && name.contains(DOC_MARKER) {
        debug!(target: IGNORED_TARGET, "ignored {}", src.display());
        ctx.report.ignored += 1;
        return;
    }

    if src.extension().and_then(|it| it.to_str()) != Some(INSTALLED_EXTENSION) {
        ctx.report.skipped += 1;
        return;
    }

    info!(target: PROGRESS_TARGET, "{} -> {}", src.display(), dst.display());
    match fs::copy(src, dst) {
        Ok(_) => ctx.report.copied += 1,
        Err(err) => ctx.report.add_error(dst, err),
    }
}
