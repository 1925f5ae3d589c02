#![forbid(unsafe_code)]

// Build information logged by the server at startup.  Each value falls back
// to "unknown" so that builds outside of a git checkout still succeed.
fn main() {
    set_env("GIT_BRANCH", build_data::get_git_branch());
    set_env("GIT_COMMIT_SHORT", build_data::get_git_commit_short());
    set_env("GIT_DIRTY", build_data::get_git_dirty().map(|d| d.to_string()));
    set_env("SOURCE_TIMESTAMP", build_data::get_source_time().map(build_data::format_timestamp));
    set_env("RUSTC_VERSION", build_data::get_rustc_version());

    // Tells cargo not to rebuild build.rs during debug builds when other files change.
    // This speeds up development builds.
    //build_data::no_debug_rebuilds();
}

fn set_env(key: &str, value: Result<String, String>) {
    let value = value.unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env={}={}", key, value);
}
