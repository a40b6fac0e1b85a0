//! Stamps the binary version with the commit it was built from.
//!
//! `PLUXEE_VERSION` is `<crate version>` or `<crate version> (<commit>)`.
//! Release builds can pin the commit through `PLUXEE_BUILD_COMMIT` when no
//! git checkout is around, as in a packaged source tarball.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=PLUXEE_BUILD_COMMIT");

    let package = env!("CARGO_PKG_VERSION");
    let version = match build_commit() {
        Some(commit) => format!("{package} ({commit})"),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=PLUXEE_VERSION={version}");
}

fn build_commit() -> Option<String> {
    if let Some(pinned) = env::var("PLUXEE_BUILD_COMMIT").ok().filter(|c| !c.trim().is_empty()) {
        return Some(pinned.trim().to_string());
    }

    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let commit = String::from_utf8(output.stdout).ok()?;
    let commit = commit.trim();
    (!commit.is_empty()).then(|| commit.to_string())
}
