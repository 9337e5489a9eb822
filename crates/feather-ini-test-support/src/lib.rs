//! Shared test harness utilities for feather-ini crates.

use std::path::PathBuf;

use feather_ini::{Document, ParseFlags};
use tempfile::{tempdir, TempDir};

/// Lines of the small networking document used across tests.
pub const NET_LINES: &[&str] = &[
    "[net]",
    "host=localhost",
    "port=8080",
    "// comment",
    "retries=",
];

/// Parses [`NET_LINES`] with slash comments stripped.
pub fn net_document() -> Document {
    let mut document = Document::new();
    document
        .parse_lines(NET_LINES, ParseFlags::COMMENTS_SLASH)
        .expect("parse sample document");
    document
}

/// Writes `contents` to a fresh `settings.ini` inside a temporary directory.
/// The directory lives as long as the returned guard.
pub fn write_fixture(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.ini");
    std::fs::write(&path, contents).expect("write fixture");
    (dir, path)
}
