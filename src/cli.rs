//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{build::BuildCommand, check::CheckCommand, test::TestCommand};
use crate::config::{
    CheckPolicy, Toolchain, DEFAULT_COMPILER, DEFAULT_COMPILER_DRIVER, DEFAULT_CONTAINER_ENGINE,
};
use crate::exec::SystemRunner;

/// asml-build - Build dispatcher
///
/// Probes for the container engine and compiler toolchain, then dispatches to
/// a local toolchain build or a container-based deploy build.
#[derive(Parser, Debug)]
#[command(name = "asml-build")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Container engine executable
    #[arg(long, global = true, env = "ASML_CONTAINER_ENGINE", default_value = DEFAULT_CONTAINER_ENGINE)]
    pub container_engine: String,

    /// Compiler driver executable
    #[arg(long, global = true, env = "ASML_COMPILER_DRIVER", default_value = DEFAULT_COMPILER_DRIVER)]
    pub compiler_driver: String,

    /// Compiler executable
    #[arg(long, global = true, env = "ASML_COMPILER", default_value = DEFAULT_COMPILER)]
    pub compiler: String,

    /// Require all external tools before any build mode runs
    #[arg(long, global = true)]
    pub require_all_tools: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the project binary
    Build(BuildCommand),

    /// Run the project test suite
    Test(TestCommand),

    /// Check for required external tools
    Check(CheckCommand),
}

impl Cli {
    /// Execute the CLI command. Returns the process exit code.
    pub fn execute(self) -> Result<i32> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let toolchain = Toolchain {
            container_engine: self.container_engine,
            compiler_driver: self.compiler_driver,
            compiler: self.compiler,
        };
        let policy = if self.require_all_tools {
            CheckPolicy::AllUpfront
        } else {
            CheckPolicy::PerMode
        };
        let runner = SystemRunner;

        match self.command {
            Commands::Build(cmd) => cmd.execute(&toolchain, policy, &runner, self.verbose),
            Commands::Test(cmd) => cmd.execute(self.verbose),
            Commands::Check(cmd) => cmd.execute(&toolchain, &runner, self.verbose),
        }
    }
}
