//! asml-build - Build dispatcher CLI
//!
//! Probes the environment for a container engine and a compiler toolchain,
//! validates a small two-level command grammar, and shells out to the
//! matching toolchain action:
//!
//! ```text
//! asml-build build local [extra-args...]   # compiler driver build on the host
//! asml-build build deploy                  # container image build + artifact extraction
//! asml-build test                          # reserved, not yet implemented
//! asml-build check                         # report which tools are present
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod probe;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::BuildError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.execute() {
        Ok(code) => to_exit_code(code),
        Err(err) => {
            utils::terminal::print_error(&format!("{:#}", err));
            if let Some(hint) = err.downcast_ref::<BuildError>().and_then(BuildError::hint) {
                utils::terminal::print_warning(hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Map a subprocess exit code onto our own. Codes outside u8 range (including
/// signal deaths reported as -1) collapse to the generic failure code.
fn to_exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
}
