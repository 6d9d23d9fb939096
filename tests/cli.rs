extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn nebula() -> Command {
    Command::cargo_bin("nebula").unwrap()
}

#[test]
fn renders_png_after_sample_limit() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("buddha.png");
    nebula()
        .args(&["-o", output.to_str().unwrap()])
        .args(&["-w", "40", "-t", "30", "-c", "20,50,100", "-j", "2", "-n", "20000"])
        .assert()
        .success();
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn png_has_the_requested_size() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("wide.png");
    nebula()
        .args(&["-o", output.to_str().unwrap()])
        .args(&["-w", "80", "-t", "60", "-j", "1", "-n", "2000"])
        .assert()
        .success();
    let bytes = fs::read(&output).unwrap();
    // IHDR: big-endian width then height.
    assert_eq!(&bytes[12..16], b"IHDR");
    assert_eq!(&bytes[16..20], &[0u8, 0, 0, 80]);
    assert_eq!(&bytes[20..24], &[0u8, 0, 0, 60]);
}

#[test]
fn renders_greyscale_ppm() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("buddha.ppm");
    nebula()
        .args(&["-o", output.to_str().unwrap()])
        .args(&["-w", "8", "-t", "8", "-c", "40", "-j", "1", "-n", "5000"])
        .assert()
        .success();
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], b"P6");
    // 8x8 RGB body after the header
    assert!(bytes.len() > 8 * 8 * 3);
    let body = &bytes[bytes.len() - 8 * 8 * 3..];
    for pixel in body.chunks(3) {
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }
}

#[test]
fn accepts_negative_viewport_corners() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("zoom.png");
    nebula()
        .args(&["-o", output.to_str().unwrap()])
        .args(&["-l", "-1.5,-1.0", "-r", "0.5,1.0"])
        .args(&["-w", "16", "-t", "16", "-j", "1", "-n", "2000"])
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn rejects_two_component_palette() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("buddha.png");
    nebula()
        .args(&["-o", output.to_str().unwrap(), "-c", "1,2", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 or 3 components"));
    assert!(!output.exists());
}

#[test]
fn rejects_non_numeric_palette() {
    nebula()
        .args(&["-o", "never.png", "-c", "10,abc,30", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("green"));
}

#[test]
fn rejects_inverted_viewport() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("buddha.png");
    nebula()
        .args(&["-o", output.to_str().unwrap()])
        .args(&["-l", "1.0,1.0", "-r", "-1.0,-1.0", "-n", "10"])
        .assert()
        .failure();
    assert!(!output.exists());
}

#[test]
fn rejects_infinite_viewport() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("buddha.png");
    nebula()
        .args(&["-o", output.to_str().unwrap()])
        .args(&["-l", "-inf,-1", "-r", "inf,1", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("finite"));
    assert!(!output.exists());
}

#[test]
fn rejects_overflowing_viewport() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("buddha.png");
    nebula()
        .args(&["-o", output.to_str().unwrap()])
        .args(&["-l", "-1e308,-1", "-r", "1e308,1", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
    assert!(!output.exists());
}

#[cfg(unix)]
#[test]
fn interrupt_writes_the_final_image() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("buddha.png");
    let mut child = nebula()
        .args(&["-o", output.to_str().unwrap()])
        .args(&["-w", "32", "-t", "32", "-j", "2"])
        .env("RUST_LOG", "info")
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // The handler is installed before this line is logged.
    let mut stderr = BufReader::new(child.stderr.take().unwrap());
    let mut line = String::new();
    while !line.contains("Press control-c") {
        line.clear();
        assert!(stderr.read_line(&mut line).unwrap() > 0, "exited early");
    }
    assert!(!output.exists());

    let killed = Command::new("kill")
        .args(&["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let mut rest = String::new();
    stderr.read_to_string(&mut rest).unwrap();
    assert!(child.wait().unwrap().success());
    assert!(rest.contains("Total samples"));
    assert_eq!(rest.matches("Writing image file").count(), 1);
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn unwritable_destination_fails_before_sampling() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("buddha.png");
    nebula()
        .args(&["-o", output.to_str().unwrap(), "-w", "8", "-t", "8", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}

#[test]
fn output_is_required() {
    nebula().assert().failure();
}
