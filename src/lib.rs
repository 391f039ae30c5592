//! Copies a source tree into an install root, driven by a small table of
//! command line options.
//!
//! The option grammar lives in [`table`] (what options exist) and [`rt`]
//! (how `argv` is turned into a [`ParseResult`]). Everything after parsing
//! is a thin layer: [`Flags`] decodes the result, [`install`] walks the tree.

use std::{io, path::PathBuf};

pub mod config;
pub mod flags;
pub mod help;
pub mod install;
pub mod rt;
pub mod table;

pub use crate::{
    flags::Flags,
    install::{install, InstallOptions, InstallReport},
    rt::{ParseError, ParseResult, Parser},
    table::{AliasIndex, OptionArgSpec, OptionId, OptionSpec, OptionTable},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("specified install root \"{}\" does not exist", .0.display())]
    InstallRootMissing(PathBuf),

    #[error("source root is not configured, set TREE_INSTALL_SOURCE")]
    SourceRootUnset,

    #[error("source root \"{}\" is not a directory", .0.display())]
    SourceRootNotDirectory(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Process exit status for this error.
    ///
    /// The numbers are part of the command line contract, scripts may match
    /// on them.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Parse(err) => err.exit_code(),
            Error::InstallRootMissing(_) => 5,
            Error::SourceRootUnset | Error::SourceRootNotDirectory(_) => 6,
            Error::Io { .. } => 7,
        }
    }
}

/// Exit status of an install that finished but failed on some entries.
pub const EXIT_PARTIAL_INSTALL: u8 = 1;
