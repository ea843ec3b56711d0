//! Integration tests for the cuecheck CLI commands.

use clap::Parser;
use cuecheck::{
    cli::{Args, Command},
    config::Config,
    pipeline,
};

const GOOD: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:03.500\nHello world\n\n00:00:04.000 --> 00:00:06.000\nSecond cue\n";
const BACKWARDS: &str = "WEBVTT\n\n00:00:05.000 --> 00:00:04.000\nbackwards\n";

fn write_vtt(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).expect("failed to write fixture");
    path
}

fn parse(argv: &[&str]) -> Command {
    Args::parse_from(argv).command
}

#[test]
fn export_writes_next_to_input_with_derived_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_vtt(&dir, "talk.vtt", GOOD);

    let Command::Export(cmd) = parse(&["cuecheck", "export", input.to_str().unwrap(), "--to", "timestamped"]) else {
        panic!("expected export command");
    };
    pipeline::run_export(&cmd, &Config::default()).unwrap();

    let out = std::fs::read_to_string(dir.path().join("talk_modified_with_ts.txt")).unwrap();
    assert_eq!(
        out,
        "[00:00:01.000 - 00:00:03.500] Hello world\n\n[00:00:04.000 - 00:00:06.000] Second cue"
    );
}

#[test]
fn export_refuses_to_overwrite_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_vtt(&dir, "talk.vtt", GOOD);
    let output = write_vtt(&dir, "out.vtt", "keep me");

    let Command::Export(cmd) = parse(&[
        "cuecheck",
        "export",
        input.to_str().unwrap(),
        "--to",
        "vtt",
        "-o",
        output.to_str().unwrap(),
    ]) else {
        panic!("expected export command");
    };
    assert!(pipeline::run_export(&cmd, &Config::default()).is_err());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn export_of_misordered_cues_only_works_as_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_vtt(&dir, "bad.vtt", BACKWARDS);

    let Command::Export(vtt) = parse(&["cuecheck", "export", input.to_str().unwrap(), "--to", "vtt"]) else {
        panic!("expected export command");
    };
    assert!(pipeline::run_export(&vtt, &Config::default()).is_err());
    assert!(!dir.path().join("bad_modified.vtt").exists());

    let Command::Export(plain) = parse(&["cuecheck", "export", input.to_str().unwrap(), "--to", "plain"]) else {
        panic!("expected export command");
    };
    pipeline::run_export(&plain, &Config::default()).unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("bad_modified.txt")).unwrap(),
        "backwards"
    );
}

#[test]
fn check_fails_on_invalid_document() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_vtt(&dir, "good.vtt", GOOD);
    let bad = write_vtt(&dir, "bad.vtt", BACKWARDS);

    let Command::Check(cmd) = parse(&["cuecheck", "check", good.to_str().unwrap()]) else {
        panic!("expected check command");
    };
    pipeline::run_check(&cmd, &Config::default()).unwrap();

    let Command::Check(cmd) = parse(&["cuecheck", "check", bad.to_str().unwrap()]) else {
        panic!("expected check command");
    };
    assert!(pipeline::run_check(&cmd, &Config::default()).is_err());
}

#[test]
fn locate_uses_half_open_intervals() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_vtt(&dir, "talk.vtt", GOOD);
    let cfg = Config::default();

    let (_, update) = pipeline::locate(&input, "00:03.500", &cfg).unwrap();
    assert_eq!(update.active, None);

    let (store, update) = pipeline::locate(&input, "4", &cfg).unwrap();
    assert_eq!(update.active, Some(1));
    assert_eq!(store.focused(), Some(1));
    assert_eq!(update.clock, "00:04");
}
