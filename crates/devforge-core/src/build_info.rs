//! Values stamped in by `build.rs`.
//!
//! `GET /health` reports them and `devforge --version` prints them.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash, suffixed `-dirty` for a modified tree, or `"unknown"`
/// when built outside a git checkout.
pub const GIT_HASH: &str = env!("DEVFORGE_GIT_HASH");

/// Seconds since the Unix epoch.
pub const BUILD_TIMESTAMP: &str = env!("DEVFORGE_BUILD_TIMESTAMP");

pub const BUILD_PROFILE: &str = env!("DEVFORGE_BUILD_PROFILE");

/// One-line form used in logs and `--version`: `0.1.0 (abc1234, debug)`.
pub fn version_string() -> String {
    format!("{VERSION} ({GIT_HASH}, {BUILD_PROFILE})")
}

/// `--version` long form, one field per line.
pub fn long_version() -> String {
    [
        VERSION.to_string(),
        format!("commit:  {GIT_HASH}"),
        format!("profile: {BUILD_PROFILE}"),
        format!("built:   {BUILD_TIMESTAMP}"),
    ]
    .join("\n")
}
