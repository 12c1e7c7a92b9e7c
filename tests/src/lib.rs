//! Fixtures shared by the end-to-end tests.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

/// Excerpt in the style of the IANA registry, with one out-of-range and one garbage line.
pub const IANA: &str = "\
# Service names and port numbers
#
tcpmux           1/tcp                # TCP Port Service Multiplexer
http            80/tcp  www www-http  # World Wide Web HTTP
http            80/udp  www www-http  # World Wide Web HTTP
https          443/tcp
dproxy        4001/tcp
INVALID-SERVICE 65536/XXX
this line is not an entry
";

/// Site-local overrides for some of the entries in [`IANA`].
pub const LOCAL: &str = "\
# Local overrides
web 80/tcp
https 443/tcp secure
tcpmux 1/tcp
";

pub fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn write_input(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path: PathBuf = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}
