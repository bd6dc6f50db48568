#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "ledsink-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_config(dir: &Path, name: &str, config: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, config.to_string()).expect("config should be writable");
    path
}

fn ledsink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ledsink"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .output()
        .expect("ledsink should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

#[test]
fn send_writes_frame_to_file_device() {
    let dir = unique_temp_dir("send");
    let out = dir.join("leds.txt");
    let config = write_config(
        &dir,
        "file.json",
        serde_json::json!({ "type": "file", "output": out, "ledCount": 2 }),
    );

    let output = ledsink(&[
        "send",
        config.to_str().unwrap(),
        "--colors",
        "1,2,3;4,5,6",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = std::fs::read_to_string(&out).expect("dump should exist");
    assert_eq!(text, " [{1,2,3}{4,5,6}]\n");
    assert_eq!(stdout_json(&output)["frames"], 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn run_stops_after_frame_count() {
    let dir = unique_temp_dir("run");
    let out = dir.join("leds.txt");
    let config = write_config(
        &dir,
        "file.json",
        serde_json::json!({ "type": "file", "output": out, "ledCount": 3 }),
    );

    let output = ledsink(&[
        "run",
        config.to_str().unwrap(),
        "--colors",
        "255,0,0",
        "--chase",
        "--fps",
        "200",
        "--frames",
        "3",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = std::fs::read_to_string(&out).expect("dump should exist");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            " [{255,0,0}{0,0,0}{0,0,0}]",
            " [{0,0,0}{255,0,0}{0,0,0}]",
            " [{0,0,0}{0,0,0}{255,0,0}]",
        ]
    );
    assert_eq!(stdout_json(&output)["frames"], 3);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn info_reports_dmx_layout_without_opening_port() {
    let dir = unique_temp_dir("info");
    let config = write_config(
        &dir,
        "dmx.json",
        serde_json::json!({
            "type": "dmx",
            "output": "/nonexistent/ttyUSB0",
            "dmxdevice": "extended",
            "ledCount": 200,
        }),
    );

    let output = ledsink(&["info", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let info = stdout_json(&output);
    assert_eq!(info["device_type"], "dmx");
    assert_eq!(info["state"], "uninitialized");
    assert_eq!(info["layout"]["profile"], "extended");
    assert_eq!(info["layout"]["fixture_count"], 128);
    assert_eq!(info["layout"]["buffer_len"], 513);
    assert_eq!(info["layout"]["truncated"], true);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn led_count_override_changes_layout() {
    let dir = unique_temp_dir("override");
    let config = write_config(
        &dir,
        "dmx.json",
        serde_json::json!({ "type": "dmx", "output": "COM9", "dmxdevice": "raw" }),
    );

    let output = ledsink(&["info", config.to_str().unwrap(), "--led-count", "2"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["layout"]["buffer_len"], 7);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unknown_profile_exits_with_config_code() {
    let dir = unique_temp_dir("badprofile");
    let config = write_config(
        &dir,
        "dmx.json",
        serde_json::json!({ "type": "dmx", "output": "COM9", "dmxdevice": "dimmer" }),
    );

    let output = ledsink(&["send", config.to_str().unwrap(), "--color", "1,1,1"]);
    assert_eq!(output.status.code(), Some(78));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown dmx device type: dimmer"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_serial_port_exits_with_transport_error() {
    let dir = unique_temp_dir("noport");
    let port = dir.join("ttyMISSING");
    let config = write_config(
        &dir,
        "dmx.json",
        serde_json::json!({ "type": "dmx", "output": port, "dmxdevice": "raw", "ledCount": 1 }),
    );

    let output = ledsink(&["send", config.to_str().unwrap(), "--color", "1,1,1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("open failed"), "stderr: {stderr}");
    assert!(stderr.contains("ttyMISSING"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn devices_lists_builtin_types() {
    let output = ledsink(&["devices"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["devices"],
        serde_json::json!(["dmx", "file"])
    );
}
