use std::process::Command;

// Release builds from a tarball have no .git; CI can pass the SHA explicitly.
fn git_short_sha() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=POPCHAT_BUILD_SHA");

    let sha = std::env::var("POPCHAT_BUILD_SHA")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(git_short_sha)
        .unwrap_or_else(|| "dev".to_string());

    println!("cargo:rustc-env=POPCHAT_GIT_SHA={sha}");
}
