//! Hex input and output for the CLI
//!
//! - Input: hex digits in either case, even length, no separators
//! - Output: lowercase hex, no separators, one line

use std::io::{self, Write};

use hex::FromHexError;
use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Decodes a hex string into bytes
pub fn decode_hex(data: &str) -> CliResult<Vec<u8>> {
    hex::decode(data).map_err(|e| match e {
        FromHexError::InvalidHexCharacter { c, index } => CliError::invalid_data(format!(
            "Invalid data given: non-hex digit '{}' at position {}",
            c, index
        )),
        FromHexError::OddLength => CliError::invalid_data(format!(
            "Invalid data given: odd number of hex digits ({})",
            data.len()
        )),
        other => CliError::invalid_data(format!("Invalid data given: {}", other)),
    })
}

/// Encodes bytes as lowercase hex
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Write bytes as one line of hex to stdout
pub fn write_hex(data: &[u8]) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", encode_hex(data))?;
    stdout.flush()?;

    Ok(())
}

/// Write a value as pretty JSON to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
