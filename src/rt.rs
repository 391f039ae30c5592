//! Turns `argv` into a [`ParseResult`].
//!
//! Tokens are classified by prefix:
//!
//! * `--name` is looked up whole,
//! * `-x` is looked up whole,
//! * `-xyz` is a bundle, each character is looked up as `-x`, `-y`, `-z`,
//! * anything else, including a lone `-`, is a positional argument.
//!
//! Once an option is found, its declared argument slots are filled from the
//! following tokens, verbatim. A value that looks like a flag is still a
//! value.

use std::{collections::BTreeMap, ffi::OsString, fmt};

use crate::table::{AliasIndex, OptionId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unrecognized option \"{0}\"")]
    UnrecognizedOption(String),

    #[error("missing required argument \"{arg}\" for option \"{option}\"")]
    MissingRequiredArgument { arg: String, option: String },

    #[error("argument \"{0}\" is not valid unicode")]
    NonUtf8Argument(String),
}

impl ParseError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ParseError::UnrecognizedOption(_) => 2,
            ParseError::MissingRequiredArgument { .. } => 3,
            ParseError::NonUtf8Argument(_) => 4,
        }
    }
}

pub struct Parser<'a> {
    index: &'a AliasIndex<'a>,
    rargs: Vec<OsString>,
}

impl<'a> Parser<'a> {
    /// `args` must not include the program name.
    pub fn new(index: &'a AliasIndex<'a>, mut args: Vec<OsString>) -> Self {
        args.reverse();
        Self { index, rargs: args }
    }

    pub fn is_empty(&self) -> bool {
        self.rargs.is_empty()
    }

    fn next(&mut self) -> Option<Result<String, ParseError>> {
        let arg = self.rargs.pop()?;
        let res = arg
            .into_string()
            .map_err(|it| ParseError::NonUtf8Argument(it.to_string_lossy().into_owned()));
        Some(res)
    }

    /// Consumes the whole argument list. On error nothing is returned, there
    /// is no partial result.
    pub fn parse(mut self) -> Result<ParseResult<'a>, ParseError> {
        let mut res =
            ParseResult { index: self.index, positionals: Vec::new(), selected: BTreeMap::new() };

        while let Some(arg) = self.next() {
            let arg = arg?;
            if arg.starts_with("--") {
                self.read_option(&arg, &mut res)?;
            } else if let Some(bundle) = arg.strip_prefix('-').filter(|it| !it.is_empty()) {
                if bundle.chars().count() == 1 {
                    self.read_option(&arg, &mut res)?;
                } else {
                    for c in bundle.chars() {
                        self.read_option(&format!("-{c}"), &mut res)?;
                    }
                }
            } else {
                res.positionals.push(arg);
            }
        }

        Ok(res)
    }

    fn read_option(&mut self, alias: &str, res: &mut ParseResult<'a>) -> Result<(), ParseError> {
        let id = self
            .index
            .lookup(alias)
            .ok_or_else(|| ParseError::UnrecognizedOption(alias.to_string()))?;

        let mut values = Vec::new();
        for slot in self.index.spec(id).args {
            match self.next() {
                Some(value) => values.push(value?),
                None if slot.required => {
                    return Err(ParseError::MissingRequiredArgument {
                        arg: slot.name.to_string(),
                        option: alias.to_string(),
                    })
                }
                None => break,
            }
        }

        // Repeating an option replaces its earlier values.
        res.selected.insert(id, values);
        Ok(())
    }
}

/// Positional arguments plus the options that were supplied, with the
/// values consumed for each.
pub struct ParseResult<'a> {
    index: &'a AliasIndex<'a>,
    positionals: Vec<String>,
    selected: BTreeMap<OptionId, Vec<String>>,
}

impl<'a> ParseResult<'a> {
    pub fn index(&self) -> &'a AliasIndex<'a> {
        self.index
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Supplied options in table order.
    pub fn selected(&self) -> impl Iterator<Item = (OptionId, &[String])> + '_ {
        self.selected.iter().map(|(id, values)| (*id, values.as_slice()))
    }

    pub fn contains(&self, id: OptionId) -> bool {
        self.selected.contains_key(&id)
    }

    pub fn values(&self, id: OptionId) -> Option<&[String]> {
        self.selected.get(&id).map(Vec::as_slice)
    }

    /// `name` is any alias or the option's full name. Unknown names are
    /// never present.
    pub fn has_option(&self, name: &str) -> bool {
        self.index.resolve(name).is_some_and(|id| self.contains(id))
    }

    pub fn values_for(&self, name: &str) -> Option<&[String]> {
        self.index.resolve(name).and_then(|id| self.values(id))
    }

    pub fn is_empty(&self) -> bool {
        self.positionals.is_empty() && self.selected.is_empty()
    }
}

impl fmt::Debug for ParseResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let selected = self
            .selected
            .iter()
            .map(|(id, values)| (self.index.spec(*id).full_name, values))
            .collect::<Vec<_>>();
        f.debug_struct("ParseResult")
            .field("positionals", &self.positionals)
            .field("selected", &DebugMap(selected))
            .finish()
    }
}

struct DebugMap<'s>(Vec<(&'static str, &'s Vec<String>)>);

impl fmt::Debug for DebugMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter().copied()).finish()
    }
}
