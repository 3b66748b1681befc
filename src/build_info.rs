//! Commit and date the binary was built from.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// e.g. `shape-quiz 2026-10-19 (a1b2c3d)`
pub fn version_line(program: &str) -> String {
    format!("{} {} ({})", program, BUILD_DATE, BUILD_COMMIT)
}
