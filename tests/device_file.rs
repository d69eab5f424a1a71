//! File-Backed Device Tests
//!
//! Exercises the CLI commands end to end against an image file standing in
//! for the OTP device node, configured the way an operator would.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command as Process, Output as ProcessOutput};

use proddata::cli::{
    decode_hex, encode_hex, execute, resolve_config, CliErrorCode, Command, Output,
};
use proddata::device::DeviceData;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

const DATASET_HEX: &str = "01\
    0019f5aabb00\
    0019f5aabb01\
    0019f5aabb02\
    0019f5aabb03\
    0019f5aabb04\
    0019f5aabb05\
    0111";

struct Fixture {
    _temp: TempDir,
    image: PathBuf,
    config: PathBuf,
}

/// Erased 512 byte image, a serial region and a config pointing at both.
fn fixture() -> Fixture {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let image = temp.path().join("otp.bin");
    let serial = temp.path().join("factory.bin");
    fs::write(&image, vec![0xFF; 512]).unwrap();

    let mut factory = vec![0x00; 32];
    factory[16..24].copy_from_slice(&[0x50, 0x52, 0x4f, 0x44, 0x00, 0x00, 0x00, 0x2a]);
    fs::write(&serial, factory).unwrap();

    let config = temp.path().join("proddata.json");
    fs::write(
        &config,
        format!(
            r#"{{"device_path": "{}", "serial_path": "{}", "serial_offset": 16}}"#,
            image.display(),
            serial.display()
        ),
    )
    .unwrap();

    Fixture {
        _temp: temp,
        image,
        config,
    }
}

fn run(fixture: &Fixture, cmd: Command) -> Result<Output, proddata::cli::CliError> {
    let config = resolve_config(Some(fixture.config.clone()), None, None)?;
    let mut device = DeviceData::new(config.open_device()?);
    execute(&mut device, cmd)
}

fn write_cmd(target: &str, value: Option<&str>) -> Command {
    Command::Write {
        target: target.to_string(),
        value: value.map(str::to_string),
    }
}

fn read_cmd(field: Option<&str>) -> Command {
    Command::Read {
        field: field.map(str::to_string),
    }
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_write_read_round_trip() {
    let fixture = fixture();
    run(&fixture, write_cmd(DATASET_HEX, None)).unwrap();

    let output = run(&fixture, read_cmd(None)).unwrap();
    match output {
        Output::Data(data) => assert_eq!(encode_hex(&data), DATASET_HEX),
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_image_holds_checksummed_registers() {
    let fixture = fixture();
    run(&fixture, write_cmd(DATASET_HEX, None)).unwrap();
    run(&fixture, write_cmd("DCXO", Some("1A"))).unwrap();

    let image = fs::read(&fixture.image).unwrap();
    assert_eq!(image.len(), 512);
    assert_eq!(&image[256..260], &[0x5b, 0x80, 0x01, 0x1a]);
    assert_eq!(&image[2..3], &[0x01]);
    assert!(image[39..256].iter().all(|b| *b == 0xFF));
}

#[test]
fn test_read_field_as_hex() {
    let fixture = fixture();
    run(&fixture, write_cmd(DATASET_HEX, None)).unwrap();

    let output = run(&fixture, read_cmd(Some("MAC_4"))).unwrap();
    assert_eq!(output, Output::Data(decode_hex("0019f5aabb04").unwrap()));
}

#[test]
fn test_read_serial_from_factory_region() {
    let fixture = fixture();
    let output = run(&fixture, read_cmd(Some("SERIAL"))).unwrap();
    assert_eq!(output, Output::Data(decode_hex("50524f440000002a").unwrap()));
}

#[test]
fn test_layout_command() {
    let fixture = fixture();
    run(&fixture, write_cmd(DATASET_HEX, None)).unwrap();

    match run(&fixture, Command::Layout).unwrap() {
        Output::Layouts(layouts) => {
            let json = serde_json::to_value(&layouts).unwrap();
            assert_eq!(json[0]["register"], "register0");
            assert_eq!(json[1]["fields"][2]["name"], "DCXO");
            assert_eq!(json[1]["fields"][2]["offset"], 259);
        }
        other => panic!("unexpected output {:?}", other),
    }
}

#[test]
fn test_odd_hex_rejected() {
    let fixture = fixture();
    let err = run(&fixture, write_cmd("DCXO", Some("1"))).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::InvalidData);

    let image = fs::read(&fixture.image).unwrap();
    assert!(image.iter().all(|b| *b == 0xFF));
}

#[test]
fn test_erased_device_reports_unknown_version() {
    let fixture = fixture();
    let err = run(&fixture, read_cmd(None)).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::DataError);
    assert!(err.to_string().contains("No valid reg version"));
}

#[test]
fn test_missing_device_is_device_error() {
    let fixture = fixture();
    let config = resolve_config(
        Some(fixture.config.clone()),
        Some(fixture.image.with_extension("missing")),
        None,
    )
    .unwrap();
    let err = config.open_device().unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::DeviceError);
}

// =============================================================================
// Binary exit status
// =============================================================================

fn proddata(image: &Path, args: &[&str]) -> ProcessOutput {
    Process::new(env!("CARGO_BIN_EXE_proddata"))
        .arg("--device")
        .arg(image)
        .args(args)
        .output()
        .expect("Failed to run proddata")
}

#[test]
fn test_binary_rejects_odd_hex() {
    let fixture = fixture();
    let output = proddata(&fixture.image, &["write", "DCXO", "1"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PRODDATA_CLI_INVALID_DATA"), "stderr: {}", stderr);
}

#[test]
fn test_binary_fails_on_erased_device() {
    let fixture = fixture();
    let output = proddata(&fixture.image, &["read"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PRODDATA_UNKNOWN_VERSION"), "stderr: {}", stderr);
}

#[test]
fn test_binary_prints_hex_on_success() {
    let fixture = fixture();
    let output = proddata(&fixture.image, &["write", DATASET_HEX]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let output = proddata(&fixture.image, &["read", "DCXO"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "11\n");
}
