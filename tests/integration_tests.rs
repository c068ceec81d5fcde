use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use ripsplit::*;
use tempfile::TempDir;

/// Test utilities for report fixtures
mod test_utils {
    use super::*;

    pub fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    /// The fixture as `mkvinfo` prints it on Windows
    pub fn crlf_report() -> String {
        let raw = std::fs::read_to_string(fixture("mkvinfo_episode.txt")).unwrap();
        probe::normalize_line_endings(&raw)
    }

    /// A `ripsplit` command isolated from any config file in the working tree
    pub fn ripsplit(workdir: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("ripsplit").unwrap();
        cmd.current_dir(workdir.path())
            .env_remove("RIPSPLIT_CONFIG")
            .env("RUST_LOG", "warn");
        cmd
    }
}

use test_utils::*;

#[test]
fn test_fixture_inventory() {
    let inventory = parse_report(&crlf_report()).unwrap();

    assert_eq!(inventory.video().len(), 1);
    assert_eq!(inventory.video()[0].track_number, 0);
    assert_eq!(inventory.video()[0].codec, "V_MPEG4/ISO/AVC");

    let audio: Vec<(u32, &str)> = inventory
        .audio()
        .iter()
        .map(|t| (t.track_number, t.codec.as_str()))
        .collect();
    assert_eq!(audio, vec![(1, "A_TRUEHD"), (2, "A_AC3")]);

    assert_eq!(inventory.subtitles().len(), 1);
    assert_eq!(inventory.subtitles()[0].track_number, 3);
    assert_eq!(inventory.subtitles()[0].language, "eng");
}

#[test]
fn test_parse_is_repeatable() {
    let report = crlf_report();
    assert_eq!(parse_report(&report).unwrap(), parse_report(&report).unwrap());
}

#[test]
fn test_duplicate_tracks_section_is_rejected() {
    let report = crlf_report();
    let doubled = report.replace("|+ Chapters", "|+ Tracks\r\n|+ Chapters");
    assert!(matches!(
        parse_report(&doubled),
        Err(ParseError::MalformedReport { found: 2 })
    ));
}

#[test]
fn test_cli_inspect_report_as_json() {
    let workdir = TempDir::new().unwrap();
    let output = ripsplit(&workdir)
        .args(["inspect", "--format", "json", "--report"])
        .arg(fixture("mkvinfo_episode.txt"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["inventory"]["audio"][0]["codec"], "A_TRUEHD");
    assert_eq!(value["inventory"]["subtitles"][0]["codec"], "S_HDMV/PGS");
}

#[test]
fn test_cli_inspect_report_as_text() {
    let workdir = TempDir::new().unwrap();
    ripsplit(&workdir)
        .args(["inspect", "--report"])
        .arg(fixture("mkvinfo_episode.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("A_TRUEHD"))
        .stdout(predicate::str::contains("S_HDMV/PGS"));
}

#[test]
fn test_cli_inspect_report_without_tracks_fails() {
    let workdir = TempDir::new().unwrap();
    let report = workdir.path().join("broken.txt");
    std::fs::write(&report, "+ EBML head\n|+ Document type: matroska\n").unwrap();

    ripsplit(&workdir)
        .args(["inspect", "--report"])
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tracks section"));
}

#[test]
fn test_cli_config_prints_defaults() {
    let workdir = TempDir::new().unwrap();
    ripsplit(&workdir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("transcode_audio_codecs"))
        .stdout(predicate::str::contains("A_TRUEHD"));
}

#[test]
fn test_cli_missing_config_file_fails() {
    let workdir = TempDir::new().unwrap();
    ripsplit(&workdir)
        .args(["--config", "nope.toml", "config"])
        .assert()
        .failure();
}
