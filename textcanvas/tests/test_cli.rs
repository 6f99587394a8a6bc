// Allow deprecated APIs (assert_cmd::cargo_bin is deprecated but still works)
#![allow(deprecated)]

use assert_cmd::Command; // Run programs, feeding stdin
use predicates::prelude::*; // Used for writing assertions
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

/// Command for a small canvas that ignores installed fonts.
fn textcanvas(output_dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("textcanvas")?;
    cmd.arg("--output-dir")
        .arg(output_dir)
        .arg("--width")
        .arg("64")
        .arg("--height")
        .arg("32")
        .arg("--no-system-fonts");
    Ok(cmd)
}

#[test]
fn test_help() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    textcanvas(dir.path())?
        .write_stdin("help\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canvas 64x32"))
        .stdout(predicate::str::contains("size <value>"))
        .stdout(predicate::str::contains("download"));
    Ok(())
}

#[test]
fn test_submit_empty_form_lists_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    textcanvas(dir.path())?
        .write_stdin("submit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("text: is required"))
        .stdout(predicate::str::contains("color: is required"))
        .stdout(predicate::str::contains("fontSize: is required"))
        .stdout(predicate::str::contains("font: ").not());
    Ok(())
}

#[test]
fn test_submit_and_download() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let script = "text Hi\nfont Arial\nsize 16\ncolor ff0000\nx 10\ny 20\nsubmit\ndownload\n";
    textcanvas(dir.path())?
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("text: 2/50"))
        .stdout(predicate::str::contains(r##""color":"#ff0000""##))
        .stdout(predicate::str::contains(r#""fontSize":16"#))
        .stdout(predicate::str::contains("Saved"));

    let path = dir.path().join("image.png");
    assert!(path.exists());
    let image = image::open(&path)?.to_rgba8();
    assert_eq!(image.dimensions(), (64, 32));
    Ok(())
}

#[test]
fn test_download_without_drawing_saves_blank_image() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    textcanvas(dir.path())?
        .write_stdin("download\nquit\n")
        .assert()
        .success();

    let image = image::open(dir.path().join("image.png"))?.to_rgba8();
    assert!(image.pixels().all(|p| p.0[3] == 0));
    Ok(())
}

#[test]
fn test_failed_download_keeps_session() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    // A regular file where the output directory should be
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, b"")?;

    textcanvas(&blocker)?
        .write_stdin("download\nfonts\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download failed"))
        .stdout(predicate::str::contains("* Verdana"));
    Ok(())
}

#[rstest]
#[case("bogus\n", "Unknown command: bogus")]
#[case("bogus foo\n", "Unknown command: bogus")]
#[case("show now\n", "`show` takes no arguments")]
#[case("color 1234567\n", "color not changed")]
#[case("color ggg\n", "color: must be a 3 or 6 digit hex color")]
#[case("x 9000\n", "x: must be between 0 and 64")]
#[case("size abc\n", "fontSize: must be a whole number")]
fn test_feedback(#[case] input: &str, #[case] expected: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    textcanvas(dir.path())?
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
    Ok(())
}

#[test]
fn test_invalid_utf8_line_keeps_session() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    textcanvas(dir.path())?
        .write_stdin(&b"text \xff\xfe\nfonts\nshow\n"[..])
        .assert()
        .success()
        .stdout(predicate::str::contains("not valid UTF-8"))
        .stdout(predicate::str::contains("* Verdana"))
        .stdout(predicate::str::contains("text: 0/50"));
    Ok(())
}

#[test]
fn test_text_limit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let script = format!("text {}\ntext {}\nshow\n", "a".repeat(50), "b".repeat(51));
    textcanvas(dir.path())?
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("text not changed"))
        .stdout(predicate::str::contains("50/50"))
        .stdout(predicate::str::contains("b".repeat(51)).not());
    Ok(())
}

#[test]
fn test_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut config = NamedTempFile::new()?;
    write!(
        config,
        r#"{{"canvas": {{"width": 20, "height": 10}}, "fonts": ["Alpha", "Beta"], "load_system_fonts": false}}"#
    )?;

    Command::cargo_bin("textcanvas")?
        .arg("--config")
        .arg(config.path())
        .arg("--output-dir")
        .arg(dir.path())
        .write_stdin("fonts\ndownload\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canvas 20x10"))
        .stdout(predicate::str::contains("  Alpha"))
        .stdout(predicate::str::contains("* Beta"));

    let image = image::open(dir.path().join("image.png"))?.to_rgba8();
    assert_eq!(image.dimensions(), (20, 10));
    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = NamedTempFile::new()?;
    write!(config, r#"{{"fonts": []}}"#)?;

    Command::cargo_bin("textcanvas")?
        .arg("--config")
        .arg(config.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Font list must not be empty"));
    Ok(())
}

#[test]
fn test_stops_at_quit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    textcanvas(dir.path())?
        .write_stdin("quit\ndownload\n")
        .assert()
        .success();
    assert!(!dir.path().join("image.png").exists());
    Ok(())
}
