//! # Line Parser
//!
//! Classifies a single line of a `services(5)` file as either a
//! [`ServiceRecord`] or a [`Rejection`].
//!
//! Accepted lines have the shape:
//!
//! ```text
//! name  port/protocol  [alias ...]  [# comment]
//! ```
//!
//! Rejections are filtering decisions, not errors. The merge engine drops
//! rejected lines and only logs the reason.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use svcmerge_common::ServiceRecord;

/// Shortest line that can hold `x p/p`.
const MIN_LINE_LEN: usize = 5;

static SERVICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+(\d{1,5})/(\S+)(?:\s+(.*))?$").expect("service line pattern is valid")
});

/// Why a line did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    Comment,
    Malformed,
    PortOutOfRange(u32),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooShort => write!(f, "line too short"),
            Rejection::Comment => write!(f, "comment line"),
            Rejection::Malformed => write!(f, "not a service entry"),
            Rejection::PortOutOfRange(port) => write!(f, "port {port} out of range"),
        }
    }
}

/// Parses one line into a record.
///
/// Surrounding whitespace is ignored. Lines are checked in this order: length,
/// leading `#`, overall shape, port range.
pub fn classify(line: &str) -> Result<ServiceRecord, Rejection> {
    let line: &str = line.trim();

    if line.chars().count() < MIN_LINE_LEN {
        return Err(Rejection::TooShort);
    }

    if line.starts_with('#') {
        return Err(Rejection::Comment);
    }

    let captures = SERVICE_LINE.captures(line).ok_or(Rejection::Malformed)?;

    // At most five digits, so this always fits.
    let port: u32 = captures[2].parse().map_err(|_| Rejection::Malformed)?;
    let port: u16 = u16::try_from(port).map_err(|_| Rejection::PortOutOfRange(port))?;

    let rest: &str = captures.get(4).map_or("", |m| m.as_str());
    let (aliases, comment) = split_rest(rest);

    let mut record = ServiceRecord::new(&captures[1], port, &captures[3]).with_aliases(aliases);
    if let Some(comment) = comment {
        record = record.with_comment(comment);
    }

    Ok(record)
}

/// Splits the text after `port/protocol` at the first `#`.
fn split_rest(rest: &str) -> (Vec<&str>, Option<&str>) {
    match rest.split_once('#') {
        Some((aliases, comment)) => (aliases.split_whitespace().collect(), Some(comment.trim())),
        None => (rest.split_whitespace().collect(), None),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
