use tree_install::{OptionArgSpec, OptionSpec, OptionTable};

/// A table with argument-bearing options, the builtin one has none.
pub(crate) fn table() -> OptionTable {
    OptionTable::new(vec![
        OptionSpec {
            full_name: "verbose",
            description: "More output.",
            aliases: &["-v", "--verbose"],
            args: &[],
        },
        OptionSpec {
            full_name: "help",
            description: "Print help.",
            aliases: &["-h", "--help"],
            args: &[],
        },
        OptionSpec {
            full_name: "output",
            description: "Where to write.",
            aliases: &["-o", "--output"],
            args: &[OptionArgSpec { name: "path", required: true }],
        },
        OptionSpec {
            full_name: "color",
            description: "When to colorize, and with which palette.",
            aliases: &["-c", "--color"],
            args: &[
                OptionArgSpec { name: "when", required: true },
                OptionArgSpec { name: "palette", required: false },
            ],
        },
        OptionSpec {
            full_name: "jobs",
            description: "Parallelism.",
            aliases: &["-j", "--jobs"],
            args: &[OptionArgSpec { name: "n", required: false }],
        },
    ])
}
