//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary with an isolated config directory
fn face_recorder_bin(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("face-recorder").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("--filter"))
        .stdout(predicate::str::contains("--authorization"))
        .stdout(predicate::str::contains("--no-camera"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("face-recorder"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn short_session_stops_cleanly() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["--duration", "400ms", "--fps", "50", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""state":"recording""#))
        .stdout(predicate::str::contains(r#""event":"faces_detected""#))
        .stdout(predicate::str::contains(r#"{"event":"state_changed","state":{"state":"stopped"}}"#));
}

#[test]
fn missing_camera_fails() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["--no-camera", "--duration", "5s", "--json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""error":"no_cameras_available""#));
}

#[test]
fn denied_authorization_fails() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["--authorization", "denied", "--duration", "5s"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("denied or restricted"));
}

#[test]
fn declined_prompt_fails_after_duration() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args([
            "--authorization",
            "not-determined",
            "--deny-request",
            "--duration",
            "200ms",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not granted"));
}

#[test]
fn missing_face_support_reports_error() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["--no-face-support", "--duration", "5s"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Recording failed"));
}

#[test]
fn invalid_duration_error() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["--duration", "soon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn invalid_filter_rejected_by_parser() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["--filter", "overlap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlap"));
}

#[test]
fn config_path_command() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("face-recorder"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["config", "set", "face_filter", "intersect"])
        .assert()
        .success();

    face_recorder_bin(&home)
        .args(["config", "get", "face_filter"])
        .assert()
        .success()
        .stdout(predicate::str::diff("intersect\n"));

    face_recorder_bin(&home)
        .args(["config", "get", "fps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home).args(["config", "init"]).assert().success();
    face_recorder_bin(&home)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    face_recorder_bin(&home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("preview_width: 640"))
        .stdout(predicate::str::contains("duration: 10s"));
}

#[test]
fn config_rejects_unknown_key_and_bad_value() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["config", "get", "api_key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown key"));

    face_recorder_bin(&home)
        .args(["config", "set", "fps", "zero"])
        .assert()
        .code(1);
}

#[test]
fn invalid_duration_in_config_is_usage_error() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("face-recorder");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "duration = \"later\"\n").unwrap();

    face_recorder_bin(&home)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("duration"));
}

#[test]
fn unknown_key_in_config_is_usage_error() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("face-recorder");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "framerate = 30\n").unwrap();

    face_recorder_bin(&home)
        .args(["--duration", "200ms"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("framerate"));
}

#[test]
fn fps_above_cap_is_rejected() {
    let home = TempDir::new().unwrap();
    face_recorder_bin(&home)
        .args(["--fps", "5000", "--duration", "200ms"])
        .assert()
        .code(2);
    face_recorder_bin(&home)
        .args(["config", "set", "fps", "5000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 240"));
}
