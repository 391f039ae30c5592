//! The catalogue of recognized options.
//!
//! An [`OptionTable`] is built once and never mutated. An [`AliasIndex`] is
//! derived from it and maps every alias (`-v`, `--verbose`) back to the
//! owning option. Options are identified by [`OptionId`], their position in
//! the table, so two options with identical declarations are still distinct.

use std::{collections::HashMap, fmt, sync::LazyLock};

/// One value slot following an option's alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionArgSpec {
    pub name: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub full_name: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    pub args: &'static [OptionArgSpec],
}

/// Position of an [`OptionSpec`] inside its [`OptionTable`].
///
/// The id does not remember which table it came from. Only use it with the
/// table, [`AliasIndex`] and `ParseResult` it was obtained from: with another
/// table it names a different option, and [`OptionTable::get`] panics if it
/// is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionId(usize);

#[derive(Debug, Clone)]
pub struct OptionTable {
    specs: Vec<OptionSpec>,
}

impl OptionTable {
    pub fn new(specs: Vec<OptionSpec>) -> OptionTable {
        OptionTable { specs }
    }

    /// The installer's own options, built on first use.
    pub fn builtin() -> &'static OptionTable {
        static TABLE: LazyLock<OptionTable> = LazyLock::new(build);
        &TABLE
    }

    pub fn get(&self, id: OptionId) -> &OptionSpec {
        &self.specs[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionSpec)> + '_ {
        self.specs.iter().enumerate().map(|(idx, spec)| (OptionId(idx), spec))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

pub const MINIMAL: &str = "--minimal";
pub const ECHO: &str = "--echo";
pub const HELP: &str = "--help";
pub const VERBOSE: &str = "--verbose";
pub const DEBUG_IGNORED: &str = "--debug-ignored";

pub fn build() -> OptionTable {
    OptionTable::new(vec![
        OptionSpec {
            full_name: "minimal install",
            description: "prevents installing of documentation or other non-essential files",
            aliases: &["-m", MINIMAL],
            args: &[],
        },
        OptionSpec {
            full_name: "echo",
            description: "prints the command that was used to invoke the program",
            aliases: &["-e", ECHO],
            args: &[],
        },
        OptionSpec {
            full_name: "help",
            description: "prints the help message",
            aliases: &["-h", HELP],
            args: &[],
        },
        OptionSpec {
            full_name: "verbose",
            description: "prints messages more frequently and with higher detail",
            aliases: &["-v", VERBOSE],
            args: &[],
        },
        OptionSpec {
            full_name: "debug-ignored",
            description: "prints debug messages when ignoring files / directories",
            aliases: &[DEBUG_IGNORED],
            args: &[],
        },
    ])
}

/// Alias to option lookup over one [`OptionTable`].
pub struct AliasIndex<'t> {
    table: &'t OptionTable,
    aliases: HashMap<&'static str, OptionId>,
}

impl<'t> AliasIndex<'t> {
    /// Indexes every alias of `table`.
    ///
    /// Panics if an option has no aliases, if an alias does not start with
    /// `-`, or if two options share an alias. These are defects in the table
    /// itself, not user errors.
    pub fn new(table: &'t OptionTable) -> AliasIndex<'t> {
        let mut aliases = HashMap::new();
        for (id, spec) in table.iter() {
            assert!(!spec.aliases.is_empty(), "option `{}` has no aliases", spec.full_name);
            for &alias in spec.aliases {
                assert!(
                    alias.len() > 1 && alias.starts_with('-'),
                    "alias `{alias}` of `{}` must start with `-`",
                    spec.full_name
                );
                if let Some(prev) = aliases.insert(alias, id) {
                    panic!(
                        "alias `{alias}` is declared by both `{}` and `{}`",
                        table.get(prev).full_name,
                        spec.full_name
                    )
                }
            }
        }
        AliasIndex { table, aliases }
    }

    pub fn builtin() -> &'static AliasIndex<'static> {
        static ALIASES: LazyLock<AliasIndex<'static>> =
            LazyLock::new(|| AliasIndex::new(OptionTable::builtin()));
        &ALIASES
    }

    /// Exact alias lookup, as done for `argv` tokens.
    pub fn lookup(&self, alias: &str) -> Option<OptionId> {
        self.aliases.get(alias).copied()
    }

    /// Lookup by alias, falling back to the option's full name.
    pub fn resolve(&self, name: &str) -> Option<OptionId> {
        self.lookup(name)
            .or_else(|| self.table.iter().find(|(_, spec)| spec.full_name == name).map(|it| it.0))
    }

    pub fn spec(&self, id: OptionId) -> &'t OptionSpec {
        self.table.get(id)
    }
}

impl fmt::Debug for AliasIndex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut aliases = self.aliases.iter().collect::<Vec<_>>();
        aliases.sort();
        f.debug_map().entries(aliases).finish()
    }
}
