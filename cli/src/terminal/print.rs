use colored::*;
use svcmerge_common::config::Config;
use svcmerge_core::MergeSummary;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

/// Events with this target are written verbatim by the log formatter.
pub const TARGET: &str = "svcmerge::print";
pub const RAW_FIELD: &str = "raw_msg";

pub fn print(msg: &str) {
    info!(target: "svcmerge::print", raw_msg = msg);
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().color(colors::PRIMARY),
        "─".repeat(right)
    )
    .color(colors::SEPARATOR);

    print(&format!("{}", line));
}

pub fn aligned_line(key: &str, value: ColoredString, key_width: usize) {
    let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
    let colon: String = format!(
        "{}{}",
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    );
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    print(&format!("{} {}{} {}", prefix, key.color(colors::TEXT_DEFAULT), colon, value));
}

pub fn summary(summary: &MergeSummary, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let rows: [(&str, ColoredString); 5] = [
        ("Sources", summary.sources.to_string().color(colors::ACCENT)),
        ("Lines read", summary.lines_read.to_string().color(colors::ACCENT)),
        ("Services", summary.records.to_string().green().bold()),
        ("Dropped", dropped(summary.dropped)),
        ("Output", summary.destination.as_str().color(colors::TEXT_DEFAULT)),
    ];
    let key_width: usize = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    header("merge complete");
    for (key, value) in rows {
        aligned_line(key, value, key_width);
    }
}

fn dropped(count: usize) -> ColoredString {
    match count {
        0 => count.to_string().color(colors::TEXT_DEFAULT),
        _ => count.to_string().yellow().bold(),
    }
}

pub fn copyright() {
    println!("svcmerge {}", env!("CARGO_PKG_VERSION"));
    println!("Copyright (C) the svcmerge contributors.");
    println!("This is free software; see the source for copying conditions.");
    println!("There is NO warranty; not even for MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.");
}
