use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let commit_full = non_empty_env("GITHUB_SHA")
        .or_else(|| run_git(&["rev-parse", "HEAD"]))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let commit_short = if commit_full == UNKNOWN {
        UNKNOWN.to_string()
    } else {
        commit_full.chars().take(7).collect()
    };

    // Reproducible builds pin the date; otherwise use the last commit date.
    let build_date = non_empty_env("SOURCE_DATE_EPOCH")
        .map(|epoch| format!("@{epoch}"))
        .or_else(|| run_git(&["log", "-1", "--format=%cI"]))
        .unwrap_or_else(|| UNKNOWN.to_string());

    println!("cargo:rustc-env=MPKSCAN_BUILD_COMMIT={}", commit_short);
    println!("cargo:rustc-env=MPKSCAN_BUILD_COMMIT_FULL={}", commit_full);
    println!("cargo:rustc-env=MPKSCAN_BUILD_DATE={}", build_date);
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn run_git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}
