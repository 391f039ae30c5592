use std::{ffi::OsString, path::PathBuf};

use crate::{
    install,
    rt::{ParseError, ParseResult, Parser},
    table::{self, AliasIndex},
};

/// Installer settings decoded from the builtin option table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flags {
    pub install_root: Option<PathBuf>,
    /// Positional arguments after the install root. They are not used.
    pub extra: Vec<String>,

    pub minimal: bool,
    pub echo: bool,
    pub help: bool,
    pub verbose: bool,
    pub debug_ignored: bool,
}

impl Flags {
    pub fn from_vec(args: Vec<OsString>) -> Result<Flags, ParseError> {
        let res = Parser::new(AliasIndex::builtin(), args).parse()?;
        Ok(Flags::from_parse(&res))
    }

    pub fn from_parse(res: &ParseResult<'_>) -> Flags {
        let mut positionals = res.positionals().iter().cloned();
        Flags {
            install_root: positionals.next().map(PathBuf::from),
            extra: positionals.collect(),

            minimal: res.has_option(table::MINIMAL),
            echo: res.has_option(table::ECHO),
            help: res.has_option(table::HELP),
            verbose: res.has_option(table::VERBOSE),
            debug_ignored: res.has_option(table::DEBUG_IGNORED),
        }
    }

    /// `tracing` filter directives enabled by these flags, on top of
    /// whatever `RUST_LOG` says.
    pub fn log_directives(&self) -> Vec<String> {
        let mut res = Vec::new();
        if self.verbose {
            res.push(format!("{}=info", install::PROGRESS_TARGET));
        }
        if self.debug_ignored {
            res.push(format!("{}=debug", install::IGNORED_TARGET));
        }
        res
    }

    pub fn install_options(&self) -> install::InstallOptions {
        install::InstallOptions { minimal: self.minimal }
    }
}
