use std::fmt::Write;

use crate::table::OptionTable;

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

pub const ABOUT: &str = "Installs the configured source tree into an install root.";

/// Usage text for `table`, with `name` as the program name.
pub fn render(name: &str, table: &OptionTable) -> String {
    let mut buf = String::new();

    w!(buf, "{name}\n");
    w!(buf, "  {ABOUT}\n");

    blank_line(&mut buf);
    w!(buf, "ARGS:\n");
    w!(buf, "    [install-root]\n");
    w!(buf, "      Destination directory, defaults to the current directory.\n");

    if !table.is_empty() {
        blank_line(&mut buf);
        w!(buf, "OPTIONS:\n");

        let mut blank = "";
        for (_, spec) in table.iter() {
            w!(buf, "{blank}");
            blank = "\n";

            w!(buf, "    {}", spec.aliases.join(", "));
            for arg in spec.args {
                let (l, r) = if arg.required { ("<", ">") } else { ("[", "]") };
                w!(buf, " {l}{}{r}", arg.name);
            }
            w!(buf, "\n");
            w!(buf, "      {}\n", spec.description);
        }
    }

    buf
}

fn blank_line(buf: &mut String) {
    w!(buf, "\n");
}
