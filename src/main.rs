use std::{
    env,
    ffi::{OsStr, OsString},
    path::Path,
    process::ExitCode,
};

use tracing::{info, warn};
use tracing_subscriber::{filter::Directive, EnvFilter};
use tree_install::{
    config, help,
    install::{self, PROGRESS_TARGET},
    table::OptionTable,
    AliasIndex, Error, Flags, Parser, Result, EXIT_PARTIAL_INSTALL,
};

fn main() -> ExitCode {
    let mut args = env::args_os().collect::<Vec<_>>();
    let program = if args.is_empty() { None } else { Some(args.remove(0)) };
    let program = program
        .as_deref()
        .and_then(|it| Path::new(it).file_name())
        .unwrap_or(OsStr::new(env!("CARGO_PKG_NAME")))
        .to_os_string();

    match run(&program, args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(program: &OsStr, args: Vec<OsString>) -> Result<u8> {
    if args.is_empty() {
        println!("use -h or --help for help");
    }

    let invocation = invocation_line(program, &args);
    let res = Parser::new(AliasIndex::builtin(), args).parse()?;
    let flags = Flags::from_parse(&res);
    init_logging(&flags);

    if flags.echo {
        println!("{invocation}");
    }

    if flags.help {
        print!("{}", help::render(&program.to_string_lossy(), OptionTable::builtin()));
        return Ok(0);
    }

    let cwd = env::current_dir().map_err(|source| Error::Io { path: ".".into(), source })?;
    let install_root = config::install_root(flags.install_root.as_deref(), &cwd)?;
    info!(target: PROGRESS_TARGET, "set install root to {}", install_root.display());
    if !flags.extra.is_empty() {
        warn!("ignoring extra arguments: {}", flags.extra.join(" "));
    }

    let source_root = config::source_root()?;
    let report = install::install(&source_root, &install_root, &flags.install_options())?;
    if !report.is_clean() {
        warn!("{} entries failed to install", report.error_count());
        return Ok(EXIT_PARTIAL_INSTALL);
    }
    Ok(0)
}

fn invocation_line(program: &OsStr, args: &[OsString]) -> String {
    let mut res = program.to_string_lossy().into_owned();
    for arg in args {
        res.push(' ');
        res.push_str(&arg.to_string_lossy());
    }
    res
}

fn init_logging(flags: &Flags) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    for directive in flags.log_directives() {
        match directive.parse::<Directive>() {
            Ok(it) => filter = filter.add_directive(it),
            Err(err) => eprintln!("bad log directive `{directive}`: {err}"),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
