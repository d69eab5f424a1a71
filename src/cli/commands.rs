//! CLI command implementations
//!
//! Commands are thin wrappers: hex in, register engine, hex out. Every
//! engine error propagates unchanged and ends the process non-zero.

use std::path::PathBuf;

use crate::access::FlashAccess;
use crate::device::DeviceData;
use crate::layout::LayoutDescription;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{decode_hex, write_hex, write_json};

/// Result of a command, printed by `run`
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Nothing to print
    None,
    /// Raw bytes, printed as lowercase hex
    Data(Vec<u8>),
    /// Active layouts, printed as JSON
    Layouts(Vec<LayoutDescription>),
}

/// Main CLI entry point
///
/// Parses arguments, opens the device and dispatches the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = resolve_config(cli.config.clone(), cli.device.clone(), cli.log_level.clone())?;

    Logger::set_threshold(config.severity()?);
    let device_path = config.device_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("device_path", device_path.as_str())]);

    let access = config.open_device()?;
    log_event_with_fields(Event::DeviceOpened, &[("device_path", device_path.as_str())]);

    let mut device = DeviceData::new(access);
    match execute(&mut device, cli.command)? {
        Output::None => Ok(()),
        Output::Data(data) => write_hex(&data),
        Output::Layouts(layouts) => write_json(&layouts),
    }
}

/// Builds the effective configuration: file (or defaults), then flags.
pub fn resolve_config(
    path: Option<PathBuf>,
    device: Option<PathBuf>,
    log_level: Option<String>,
) -> CliResult<Config> {
    let mut config = match path {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(device) = device {
        config.device_path = device;
    }
    if let Some(log_level) = log_level {
        config.log_level = log_level;
    }

    config.validate()?;
    Ok(config)
}

/// Run a command against an open device
pub fn execute<A: FlashAccess>(device: &mut DeviceData<A>, cmd: Command) -> CliResult<Output> {
    match cmd {
        Command::Write {
            target,
            value: None,
        } => write(device, &target),
        Command::Write {
            target,
            value: Some(value),
        } => write_field(device, &target, &value),
        Command::Read { field: None } => read(device),
        Command::Read { field: Some(field) } => read_field(device, &field),
        Command::Layout => layout(device),
    }
}

/// Write complete calibration data from hex
pub fn write<A: FlashAccess>(device: &mut DeviceData<A>, data: &str) -> CliResult<Output> {
    let buf = decode_hex(data)?;
    device.write(&buf)?;
    Ok(Output::None)
}

/// Write a single field from hex
pub fn write_field<A: FlashAccess>(
    device: &mut DeviceData<A>,
    name: &str,
    value: &str,
) -> CliResult<Output> {
    if name.is_empty() {
        return Err(CliError::invalid_data("Field name must not be empty"));
    }
    let buf = decode_hex(value)?;
    device.write_field(name, &buf)?;
    Ok(Output::None)
}

/// Read complete calibration data
pub fn read<A: FlashAccess>(device: &mut DeviceData<A>) -> CliResult<Output> {
    Ok(Output::Data(device.read()?))
}

/// Read a single field
pub fn read_field<A: FlashAccess>(device: &mut DeviceData<A>, name: &str) -> CliResult<Output> {
    Ok(Output::Data(device.read_field(name)?))
}

/// Describe the layouts selected by the stored versions
pub fn layout<A: FlashAccess>(device: &mut DeviceData<A>) -> CliResult<Output> {
    let layouts = device.read_versions()?;
    if Logger::enabled(Severity::Trace) {
        let count = layouts.iter().count().to_string();
        Logger::trace("LAYOUT_DESCRIBED", &[("registers", count.as_str())]);
    }
    Ok(Output::Layouts(layouts.describe()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MemoryAccess;
    use crate::cli::CliErrorCode;

    fn dataset_hex() -> String {
        let mut hex = String::from("01");
        for mac in 0..6 {
            hex.push_str(&format!("0019f5aabb{:02x}", mac));
        }
        hex.push_str("0111");
        hex
    }

    #[test]
    fn test_write_then_read_dataset() {
        let mut device = DeviceData::new(MemoryAccess::new());
        let hex = dataset_hex();

        execute(
            &mut device,
            Command::Write {
                target: hex.clone(),
                value: None,
            },
        )
        .unwrap();

        let output = execute(&mut device, Command::Read { field: None }).unwrap();
        assert_eq!(output, Output::Data(decode_hex(&hex).unwrap()));
    }

    #[test]
    fn test_write_then_read_field() {
        let mut device = DeviceData::new(MemoryAccess::new());
        write(&mut device, &dataset_hex()).unwrap();

        execute(
            &mut device,
            Command::Write {
                target: "DCXO".to_string(),
                value: Some("1A".to_string()),
            },
        )
        .unwrap();

        let output = execute(
            &mut device,
            Command::Read {
                field: Some("DCXO".to_string()),
            },
        )
        .unwrap();
        assert_eq!(output, Output::Data(vec![0x1A]));
    }

    #[test]
    fn test_invalid_hex_never_reaches_device() {
        let mut device = DeviceData::new(MemoryAccess::new());
        let err = write(&mut device, "01f").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidData);
        assert!(device.access().ops().is_empty());
    }

    #[test]
    fn test_engine_errors_propagate() {
        let mut device = DeviceData::new(MemoryAccess::new());
        let err = read(&mut device).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::DataError);
        assert!(err.message().contains("PRODDATA_UNKNOWN_VERSION"));
    }

    #[test]
    fn test_layout_output() {
        let mut device = DeviceData::new(MemoryAccess::new());
        write(&mut device, &dataset_hex()).unwrap();

        match layout(&mut device).unwrap() {
            Output::Layouts(layouts) => {
                assert_eq!(layouts.len(), 2);
                assert_eq!(layouts[0].size, 39);
                assert_eq!(layouts[1].version, 1);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_resolve_config_overrides() {
        let config = resolve_config(
            None,
            Some(PathBuf::from("/tmp/otp.bin")),
            Some("info".to_string()),
        )
        .unwrap();
        assert_eq!(config.device_path, PathBuf::from("/tmp/otp.bin"));
        assert_eq!(config.severity().unwrap(), Severity::Info);

        let err = resolve_config(None, None, Some("loud".to_string())).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
