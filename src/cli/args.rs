//! CLI argument definitions using clap
//!
//! Commands:
//! - proddata write <data>
//! - proddata write <field> <value>
//! - proddata read [field]
//! - proddata layout

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// proddata - read and write production data in device OTP memory
#[derive(Parser, Debug)]
#[command(name = "proddata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Device or image file holding the registers (overrides config)
    #[arg(long, global = true)]
    pub device: Option<PathBuf>,

    /// Minimum log severity written to stderr (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write complete calibration data, or a single field
    Write {
        /// Hex data for both registers, or a field name when VALUE is given
        target: String,

        /// Hex value of the named field
        value: Option<String>,
    },

    /// Read complete calibration data, or a single field
    Read {
        /// Field name (e.g. MAC_0, DCXO, SERIAL)
        field: Option<String>,
    },

    /// Print the layouts selected by the stored versions as JSON
    Layout,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
