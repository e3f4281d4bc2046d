//! Subprocess execution behind a mockable runner seam

#![allow(dead_code)]

use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

/// How a subprocess's standard streams are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Inherit stdin/stdout/stderr for interactive toolchain invocations.
    Inherit,
    /// Capture stdout and stderr as text.
    Capture,
    /// Discard all output. Used when probing for tool presence.
    Suppress,
    /// Redirect stdout to a file on the host, byte-for-byte; stderr is
    /// inherited. Used for pulling binary artifacts out of a container.
    ToFile(PathBuf),
}

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code
    pub exit_code: i32,

    /// Captured standard output (empty unless `OutputMode::Capture`)
    pub stdout: String,

    /// Captured standard error (empty unless `OutputMode::Capture`)
    pub stderr: String,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        let exit_code = status.code().unwrap_or(-1);
        Self {
            success: status.success(),
            exit_code,
            stdout,
            stderr,
            duration,
        }
    }
}

/// The dispatcher's single seam to the outside world. Every external tool
/// invocation goes through here, which lets tests verify dispatch decisions
/// without real toolchains installed.
pub trait ProcessRunner {
    /// Run `program` with `args` as discrete argv entries. No shell is
    /// involved, so each argument reaches the subprocess literally.
    fn run(&self, program: &str, args: &[String], output: OutputMode) -> Result<CommandResult>;
}

/// Runs subprocesses on the host via `std::process::Command`.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], output: OutputMode) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args);

        match output {
            OutputMode::Inherit => {
                cmd.stdin(Stdio::inherit());
                cmd.stdout(Stdio::inherit());
                cmd.stderr(Stdio::inherit());

                let status = cmd
                    .status()
                    .with_context(|| format!("Failed to execute {}", program))?;

                Ok(CommandResult::from_status(
                    status,
                    String::new(),
                    String::new(),
                    start.elapsed(),
                ))
            }
            OutputMode::Capture => {
                let out = cmd
                    .output()
                    .with_context(|| format!("Failed to execute {}", program))?;

                let stdout = String::from_utf8_lossy(&out.stdout).to_string();
                let stderr = String::from_utf8_lossy(&out.stderr).to_string();

                Ok(CommandResult::from_status(
                    out.status,
                    stdout,
                    stderr,
                    start.elapsed(),
                ))
            }
            OutputMode::Suppress => {
                cmd.stdin(Stdio::null());
                cmd.stdout(Stdio::null());
                cmd.stderr(Stdio::null());

                let status = cmd
                    .status()
                    .with_context(|| format!("Failed to execute {}", program))?;

                Ok(CommandResult::from_status(
                    status,
                    String::new(),
                    String::new(),
                    start.elapsed(),
                ))
            }
            OutputMode::ToFile(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;

                cmd.stdin(Stdio::null());
                cmd.stdout(Stdio::from(file));
                cmd.stderr(Stdio::inherit());

                let status = cmd
                    .status()
                    .with_context(|| format!("Failed to execute {}", program))?;

                Ok(CommandResult::from_status(
                    status,
                    String::new(),
                    String::new(),
                    start.elapsed(),
                ))
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording runner for dispatch tests.

    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    use anyhow::{anyhow, Result};

    use super::{CommandResult, OutputMode, ProcessRunner};

    /// One recorded invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        pub program: String,
        pub args: Vec<String>,
        pub output: OutputMode,
    }

    /// Replays scripted outcomes and records every invocation in order.
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<RecordedCall>>,
        /// Programs that cannot be executed at all (spawn failure).
        pub missing: HashSet<String>,
        /// Programs that run but exit with the given nonzero code.
        pub failing: HashMap<String, i32>,
        /// Programs whose `--version` probe succeeds but whose real
        /// invocations exit with the given code.
        pub failing_dispatch: HashMap<String, i32>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_missing(tools: &[&str]) -> Self {
            Self {
                missing: tools.iter().map(|t| t.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn with_failing(program: &str, exit_code: i32) -> Self {
            let mut failing = HashMap::new();
            failing.insert(program.to_string(), exit_code);
            Self {
                failing,
                ..Self::default()
            }
        }

        pub fn with_failing_dispatch(program: &str, exit_code: i32) -> Self {
            let mut failing_dispatch = HashMap::new();
            failing_dispatch.insert(program.to_string(), exit_code);
            Self {
                failing_dispatch,
                ..Self::default()
            }
        }

        /// Calls that were not `--version` presence probes.
        pub fn dispatched(&self) -> Vec<RecordedCall> {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.args.first().map(String::as_str) != Some("--version"))
                .cloned()
                .collect()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String], output: OutputMode) -> Result<CommandResult> {
            self.calls.borrow_mut().push(RecordedCall {
                program: program.to_string(),
                args: args.to_vec(),
                output,
            });

            if self.missing.contains(program) {
                return Err(anyhow!("Failed to execute {}", program));
            }

            let is_probe = args.first().map(String::as_str) == Some("--version");
            let exit_code = if is_probe {
                self.failing.get(program).copied().unwrap_or(0)
            } else {
                self.failing
                    .get(program)
                    .or_else(|| self.failing_dispatch.get(program))
                    .copied()
                    .unwrap_or(0)
            };
            Ok(CommandResult {
                success: exit_code == 0,
                exit_code,
                stdout: String::new(),
                stderr: String::new(),
                duration: Duration::ZERO,
            })
        }
    }
}
