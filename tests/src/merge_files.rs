#![cfg(test)]
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use svcmerge_common::MergeError;
use svcmerge_common::interrupt::Interrupt;
use svcmerge_core::MergeJob;
use svcmerge_core::io::{InputSpec, OutputSpec};
use svcmerge_integration_tests::{IANA, LOCAL, generated_at, write_input};
use tempfile::TempDir;

fn run<P: AsRef<Path>>(inputs: &[P], output: &Path) -> Result<String, MergeError> {
    let job = MergeJob::new(
        inputs.iter().map(|p| InputSpec::Path(p.as_ref().to_path_buf())).collect(),
        OutputSpec::Path(output.to_path_buf()),
    );
    job.run_at(&generated_at(), &Interrupt::new())?;
    Ok(fs::read_to_string(output).unwrap())
}

/// Drops the header so outputs from different runs can be compared.
fn records(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| !line.starts_with('#') && !line.is_empty())
        .collect()
}

#[test]
fn merges_two_files_with_precedence() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);
    let local = write_input(&dir, "local", LOCAL);
    let output = dir.path().join("services");

    let text = run(&[&iana, &local], &output).unwrap();

    let expected = format!(
        "\
# {out}
#
# Generated by svcmerge on 2024-05-01 12:00:00 +0000
#
# Sources:
#   1. {iana}
#   2. {local}

tcpmux               1/tcp  # TCP Port Service Multiplexer
web                 80/tcp  http www www-http  # World Wide Web HTTP
http                80/udp  www www-http  # World Wide Web HTTP
https              443/tcp  secure
dproxy            4001/tcp

# EOF
",
        out = output.display(),
        iana = iana.display(),
        local = local.display(),
    );
    assert_eq!(text, expected);
}

#[test]
fn out_of_range_port_never_reaches_output() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);
    let output = dir.path().join("services");

    let text = run(&[&iana], &output).unwrap();

    assert!(!text.contains("INVALID-SERVICE"));
    assert!(!text.contains("65536"));
    assert!(text.contains(&format!("# Source:\n#   1. {}\n", iana.display())));
}

#[test]
fn merging_a_file_with_itself_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);

    let once = run(&[&iana], &dir.path().join("once")).unwrap();
    let twice = run(&[&iana, &iana], &dir.path().join("twice")).unwrap();

    assert_eq!(records(&once), records(&twice));
    // The repeated name is listed once.
    assert!(twice.contains(&format!("# Source:\n#   1. {}\n", iana.display())));
    assert!(!twice.contains("#   2. "));
}

#[test]
fn output_is_valid_input() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);
    let local = write_input(&dir, "local", LOCAL);

    let first = run(&[&iana, &local], &dir.path().join("first")).unwrap();
    let again = run(&[&dir.path().join("first")], &dir.path().join("again")).unwrap();

    assert_eq!(records(&first), records(&again));
}

#[test]
fn output_can_replace_an_input() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);
    let local = write_input(&dir, "local", LOCAL);

    let text = run(&[&iana, &local], &local).unwrap();

    assert!(text.contains("secure"));
    assert_eq!(fs::read_to_string(&local).unwrap(), text);
}

#[test]
fn missing_input_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);
    let output = dir.path().join("services");

    let err = run(&[&iana, &dir.path().join("missing")], &output).unwrap_err();

    assert!(matches!(err, MergeError::Open { .. }));
    assert!(err.to_string().contains("missing"));
    assert!(!output.exists());
}

#[test]
fn directory_output_is_rejected() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);

    let err = run(&[&iana], dir.path()).unwrap_err();

    assert!(matches!(err, MergeError::InvalidFileType { .. }));
}

#[test]
fn unwritable_destination_is_fatal() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);
    let output = dir.path().join("no-such-dir").join("services");

    let err = run(&[&iana], &output).unwrap_err();

    assert!(matches!(err, MergeError::Write { .. }));
}

#[test]
fn summary_counts_lines() {
    let dir = TempDir::new().unwrap();
    let iana = write_input(&dir, "iana", IANA);
    let local = write_input(&dir, "local", LOCAL);
    let output = dir.path().join("services");

    let job = MergeJob::new(
        vec![InputSpec::Path(iana), InputSpec::Path(local)],
        OutputSpec::Path(output.clone()),
    );
    let summary = job.run_at(&generated_at(), &Interrupt::new()).unwrap();

    assert_eq!(summary.sources, 2);
    assert_eq!(summary.lines_read, 9 + 4);
    assert_eq!(summary.records, 5);
    assert_eq!(summary.dropped, 2);
    assert_eq!(summary.destination, output.display().to_string());
}
