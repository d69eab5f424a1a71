//! CLI module for proddata
//!
//! Provides command-line interface for:
//! - write: whole dataset or a single field, from hex
//! - read: whole dataset or a single field, as hex
//! - layout: active register layouts, as JSON

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{execute, read, read_field, resolve_config, run, write, write_field, Output};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{decode_hex, encode_hex, write_hex};
