//! # Serializer
//!
//! Turns [`MergedServices`] back into `services(5)` text:
//!
//! ```text
//! # /etc/services
//! #
//! # Generated by svcmerge on 2024-05-01 12:00:00 +0000
//! #
//! # Sources:
//! #   1. /usr/share/iana/services
//! #   2. local.services
//!
//! ssh                 22/tcp  # The Secure Shell (SSH) Protocol
//! http                80/tcp  www www-http  # World Wide Web HTTP
//!
//! # EOF
//! ```
//!
//! The output parses back into the same records.

use chrono::{DateTime, TimeZone};
use svcmerge_common::ServiceRecord;

use crate::merge::MergedServices;

const PROGRAM: &str = "svcmerge";
const NAME_WIDTH: usize = 15;
const PORT_WIDTH: usize = 5;
const FIELD_SEPARATOR: &str = "  ";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
pub const EOF_MARKER: &str = "# EOF";

/// Renders the whole output file, one entry per line, without line terminators.
pub fn render<Tz>(
    services: &MergedServices,
    destination: &str,
    sources: &[String],
    generated_at: &DateTime<Tz>,
) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut lines: Vec<String> = header(destination, sources, generated_at);

    if !services.is_empty() {
        lines.push(String::new());
        lines.extend(services.sorted().into_iter().map(record_line));
    }

    lines.push(String::new());
    lines.push(EOF_MARKER.to_string());
    lines
}

fn header<Tz>(destination: &str, sources: &[String], generated_at: &DateTime<Tz>) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut lines: Vec<String> = vec![
        format!("# {destination}"),
        String::from("#"),
        format!(
            "# Generated by {PROGRAM} on {}",
            generated_at.format(TIMESTAMP_FORMAT)
        ),
        String::from("#"),
    ];

    let distinct: Vec<&str> = distinct_sources(sources);
    let label: &str = if distinct.len() == 1 { "Source" } else { "Sources" };
    lines.push(format!("# {label}:"));
    lines.extend(
        distinct
            .iter()
            .enumerate()
            .map(|(idx, name)| format!("#   {}. {name}", idx + 1)),
    );

    lines
}

/// Source names without repeats, in first-seen order.
fn distinct_sources(sources: &[String]) -> Vec<&str> {
    let mut distinct: Vec<&str> = Vec::with_capacity(sources.len());
    for source in sources {
        if !distinct.contains(&source.as_str()) {
            distinct.push(source);
        }
    }
    distinct
}

/// Formats one record as `name  port/protocol  aliases  # comment`.
pub fn record_line(record: &ServiceRecord) -> String {
    let mut fields: Vec<String> = vec![
        format!("{:<width$}", record.name, width = NAME_WIDTH),
        format!("{:>width$}/{}", record.port(), record.protocol(), width = PORT_WIDTH),
    ];

    let aliases: Vec<&str> = record.aliases().collect();
    if !aliases.is_empty() {
        fields.push(aliases.join(" "));
    }

    if let Some(comment) = &record.comment {
        fields.push(format!("# {comment}"));
    }

    fields.join(FIELD_SEPARATOR)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
