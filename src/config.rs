//! Where to install from and to.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

pub const SOURCE_ENV: &str = "TREE_INSTALL_SOURCE";

/// Source root baked in at build time, if any.
const BUILD_SOURCE: Option<&str> = option_env!("TREE_INSTALL_SOURCE");

/// The runtime environment variable wins over the value baked in at build
/// time.
pub fn source_root() -> Result<PathBuf> {
    let runtime = env::var_os(SOURCE_ENV).filter(|it| !it.is_empty()).map(PathBuf::from);
    resolve_source_root(runtime, BUILD_SOURCE)
}

fn resolve_source_root(runtime: Option<PathBuf>, baked: Option<&str>) -> Result<PathBuf> {
    let path = runtime
        .or_else(|| baked.filter(|it| !it.is_empty()).map(PathBuf::from))
        .ok_or(Error::SourceRootUnset)?;
    if !path.is_dir() {
        return Err(Error::SourceRootNotDirectory(path));
    }
    Ok(path)
}

/// `arg` made absolute against `cwd`, or `cwd` itself. The result must
/// exist.
pub fn install_root(arg: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let path = match arg {
        Some(arg) => cwd.join(arg),
        None => cwd.to_path_buf(),
    };
    if !path.exists() {
        return Err(Error::InstallRootMissing(path));
    }
    Ok(path)
}
