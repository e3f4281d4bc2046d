//! Build command implementation

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::build::docker::DeployBuilder;
use crate::config::{CheckPolicy, DeployConfig, Toolchain};
use crate::error::BuildError;
use crate::exec::{OutputMode, ProcessRunner};
use crate::probe::{self, Capabilities};
use crate::utils::terminal;

/// Build the project binary
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(subcommand)]
    pub mode: BuildMode,
}

/// How the binary gets built
#[derive(Subcommand, Debug)]
pub enum BuildMode {
    /// Build a binary on the host with the compiler driver
    Local {
        /// Extra arguments forwarded verbatim to the compiler driver's build action
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        extra_args: Vec<String>,
    },

    /// Build a deployable container image and extract the binary artifact
    Deploy {
        /// Image tag version (falls back to the Cargo.toml manifest, then 0.1.0)
        #[arg(long, env = "ASML_TAG_VERSION")]
        tag_version: Option<String>,
    },
}

impl BuildCommand {
    /// Execute the build command. Returns the process exit code, which
    /// mirrors the underlying toolchain invocation.
    pub fn execute(
        self,
        toolchain: &Toolchain,
        policy: CheckPolicy,
        runner: &dyn ProcessRunner,
        verbose: bool,
    ) -> Result<i32> {
        let caps = probe::probe(toolchain, runner);

        if policy == CheckPolicy::AllUpfront {
            require_all(toolchain, &caps, "build")?;
        }

        match self.mode {
            BuildMode::Local { extra_args } => {
                build_local(toolchain, &caps, runner, &extra_args, verbose)
            }
            BuildMode::Deploy { tag_version } => {
                build_deploy(toolchain, &caps, runner, tag_version.as_deref(), verbose)
            }
        }
    }
}

fn require(present: bool, tool: &str, required_for: &str) -> Result<()> {
    if present {
        Ok(())
    } else {
        Err(BuildError::missing_tool(tool, required_for).into())
    }
}

fn require_all(toolchain: &Toolchain, caps: &Capabilities, required_for: &str) -> Result<()> {
    require(caps.container_engine, &toolchain.container_engine, required_for)?;
    require(caps.compiler_driver, &toolchain.compiler_driver, required_for)?;
    require(caps.compiler, &toolchain.compiler, required_for)
}

/// Run the compiler driver's build action on the host, forwarding the
/// user's trailing arguments as discrete argv entries.
fn build_local(
    toolchain: &Toolchain,
    caps: &Capabilities,
    runner: &dyn ProcessRunner,
    extra_args: &[String],
    verbose: bool,
) -> Result<i32> {
    require(caps.compiler_driver, &toolchain.compiler_driver, "build local")?;
    require(caps.compiler, &toolchain.compiler, "build local")?;

    terminal::print_info("Building local build...");

    let mut args = vec!["build".to_string()];
    args.extend(extra_args.iter().cloned());
    if verbose {
        eprintln!("{} {}", toolchain.compiler_driver, args.join(" "));
    }

    let result = runner.run(&toolchain.compiler_driver, &args, OutputMode::Inherit)?;
    if !result.success {
        terminal::print_error(&format!(
            "{} exited with status {}",
            toolchain.compiler_driver, result.exit_code
        ));
    }
    Ok(result.exit_code)
}

/// Build the deployment image and extract the release binary from it.
fn build_deploy(
    toolchain: &Toolchain,
    caps: &Capabilities,
    runner: &dyn ProcessRunner,
    tag_version: Option<&str>,
    verbose: bool,
) -> Result<i32> {
    require_all(toolchain, caps, "build deploy")?;

    let config = DeployConfig::resolve(tag_version, Path::new("Cargo.toml"));
    DeployBuilder::new(toolchain, config).execute(runner, verbose)
}
