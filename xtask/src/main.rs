
use std::time::Instant;

use xshell::{cmd, Shell};

fn main() -> xshell::Result<()> {
    let sh = Shell::new()?;

    cmd!(sh, "rustup toolchain install stable --no-self-update").run()?;
    let _e = sh.push_env("RUSTUP_TOOLCHAIN", "stable");
    cmd!(sh, "rustc --version").run()?;

    {
        let _s = section("BUILD");
        cmd!(sh, "cargo test --workspace --no-run").run()?;
    }

    {
        let _s = section("TEST");
        cmd!(sh, "cargo test --workspace -- --nocapture").run()?;
    }

    {
        let _s = section("SMOKE");
        let tmp = sh.create_temp_dir()?;
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        sh.create_dir(&src)?;
        sh.create_dir(&dst)?;
        sh.write_file(src.join("init.lua"), "return {}\n")?;

        let _env = sh.push_env("TREE_INSTALL_SOURCE", &src);
        cmd!(sh, "cargo run -q -p tree-install -- --verbose {dst}").run()?;
        let installed = sh.read_file(dst.join("init.lua"))?;
        assert_eq!(installed, "return {}\n");
    }

    Ok(())
}

fn section(name: &'static str) -> impl Drop {
    println!("::group::{name}");
    let start = Instant::now();
    defer(move || {
        let elapsed = start.elapsed();
        eprintln!("{name}: {elapsed:.2?}");
        println!("::endgroup::");
    })
}

fn defer<F: FnOnce()>(f: F) -> impl Drop {
    struct D<F: FnOnce()>(Option<F>);
    impl<F: FnOnce()> Drop for D<F> {
        fn drop(&mut self) {
            if let Some(f) = self.0.take() {
                f()
            }
        }
    }
    D(Some(f))
}
