use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tree-install"))
}

fn write_text(path: &Path, txt: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, txt).unwrap();
}

/// `src/` with a few installable files and an empty `dst/` next to it.
fn fixture() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    write_text(&src.join("init.lua"), "init");
    write_text(&src.join("notes.txt"), "notes");
    write_text(&src.join("lib/util.lua"), "util");
    write_text(&src.join("lib/util.doc.lua"), "docs");
    write_text(&src.join(".cache/x.lua"), "hidden");
    fs::create_dir(tmp.path().join("dst")).unwrap();
    tmp
}

fn run(cwd: &Path, source: Option<&Path>, args: &[&str]) -> Output {
    let mut cmd = Command::new(bin());
    cmd.current_dir(cwd).args(args).env_remove("RUST_LOG").env("NO_COLOR", "1");
    match source {
        Some(source) => cmd.env("TREE_INSTALL_SOURCE", source),
        None => cmd.env_remove("TREE_INSTALL_SOURCE"),
    };
    cmd.output().expect("failed to run tree-install")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_short_circuits() {
    let tmp = fixture();
    let out = run(tmp.path(), Some(&tmp.path().join("src")), &["--help", "dst"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.starts_with("tree-install\n"), "{text}");
    assert!(text.contains("    -m, --minimal\n"), "{text}");
    assert!(text.contains("    --debug-ignored\n"), "{text}");
    assert!(!tmp.path().join("dst/init.lua").exists());
}

#[test]
fn help_does_not_need_a_valid_install_root() {
    let tmp = fixture();
    let out = run(tmp.path(), None, &["-h", "does-not-exist"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn echo() {
    let tmp = fixture();
    let out = run(tmp.path(), None, &["-e", "--help"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).lines().next(), Some("tree-install -e --help"));
}

#[test]
fn unrecognized_option() {
    let tmp = fixture();
    let out = run(tmp.path(), None, &["-z"]);
    assert_eq!(out.status.code(), Some(2));
    assert_eq!(stderr(&out), "error: unrecognized option \"-z\"\n");
    assert_eq!(stdout(&out), "");
}

#[test]
fn install_root_missing() {
    let tmp = fixture();
    let out = run(tmp.path(), Some(&tmp.path().join("src")), &["missing"]);
    assert_eq!(out.status.code(), Some(5));
    assert!(stderr(&out).contains("does not exist"), "{}", stderr(&out));
}

#[test]
fn source_root_not_a_directory() {
    let tmp = fixture();
    let out = run(tmp.path(), Some(&tmp.path().join("src/init.lua")), &["dst"]);
    assert_eq!(out.status.code(), Some(6));
}

#[test]
fn install() {
    let tmp = fixture();
    let out = run(tmp.path(), Some(&tmp.path().join("src")), &["dst"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "");

    let dst = tmp.path().join("dst");
    assert_eq!(fs::read_to_string(dst.join("init.lua")).unwrap(), "init");
    assert!(dst.join("lib/util.lua").is_file());
    assert!(dst.join("lib/util.doc.lua").is_file());
    assert!(!dst.join("notes.txt").exists());
    assert!(!dst.join(".cache").exists());
}

#[test]
fn install_minimal_verbose() {
    let tmp = fixture();
    let out = run(tmp.path(), Some(&tmp.path().join("src")), &["-mv", "--debug-ignored", "dst"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let dst = tmp.path().join("dst");
    assert!(dst.join("lib/util.lua").is_file());
    assert!(!dst.join("lib/util.doc.lua").exists());

    let log = stderr(&out);
    assert!(log.contains("set install root to"), "{log}");
    assert!(log.contains("init.lua -> "), "{log}");
    assert!(log.contains("ignored "), "{log}");
    assert!(log.contains("util.doc.lua"), "{log}");
}

#[test]
fn no_arguments_installs_into_cwd() {
    let tmp = fixture();
    let dst = tmp.path().join("dst");
    let out = run(&dst, Some(&tmp.path().join("src")), &[]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out), "use -h or --help for help\n");
    assert!(dst.join("init.lua").is_file());
}

#[test]
fn partial_install_exits_with_one() {
    let tmp = fixture();
    // A file where the `lib` directory should go.
    write_text(&tmp.path().join("dst/lib"), "in the way");
    let out = run(tmp.path(), Some(&tmp.path().join("src")), &["dst"]);
    assert_eq!(out.status.code(), Some(1));
    let log = stderr(&out);
    assert!(log.contains("1 entries failed to install"), "{log}");
    assert!(tmp.path().join("dst/init.lua").is_file());
}

#[test]
fn extra_positionals_are_reported() {
    let tmp = fixture();
    let out = run(tmp.path(), Some(&tmp.path().join("src")), &["dst", "extra", "more"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let log = stderr(&out);
    assert!(log.contains("ignoring extra arguments: extra more"), "{log}");
    assert!(tmp.path().join("dst/init.lua").is_file());
}
