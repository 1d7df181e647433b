//! Build script: bakes the commit hash and build date into the binary.
//!
//! CI sets `BUILD_COMMIT` and `BUILD_DATE`. Local builds ask git and the
//! system clock instead.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Command;

const SHORT_HASH_LEN: usize = 7;
const UNKNOWN: &str = "unknown";

fn main() -> io::Result<()> {
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .or_else(commit_from_git)
        .and_then(|raw| short_hash(&raw))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let date = env::var("BUILD_DATE")
        .ok()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    // Debug formatting quotes and escapes, so any env value stays a valid literal
    let generated = format!(
        "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
        commit,
        date.trim()
    );

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set"))?;
    fs::write(out_dir.join("build_info.rs"), generated)?;

    for path in [".git/HEAD", ".git/refs/heads"] {
        println!("cargo:rerun-if-changed={}", path);
    }
    for var in ["BUILD_COMMIT", "BUILD_DATE"] {
        println!("cargo:rerun-if-env-changed={}", var);
    }
    Ok(())
}

fn commit_from_git() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

/// First seven hex digits of a commit id, or `None` if it isn't one.
fn short_hash(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let is_hash = raw.len() >= SHORT_HASH_LEN && raw.chars().all(|c| c.is_ascii_hexdigit());
    is_hash.then(|| raw[..SHORT_HASH_LEN].to_ascii_lowercase())
}
