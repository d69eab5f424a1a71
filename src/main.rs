//! proddata CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. Errors go to stderr
//! and the process exits non-zero.
//!
//! main.rs must NOT open the device or touch configuration itself. All
//! logic is delegated to the CLI module.

use proddata::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
