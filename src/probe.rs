//! Environment probing
//!
//! Each external tool is invoked once with `--version`, output suppressed.
//! A tool counts as present iff that invocation runs and exits zero.
//! Absence is data, not an error: probing never fails the process.

use crate::config::Toolchain;
use crate::exec::{OutputMode, ProcessRunner};

/// Which of the external tools answered an invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub container_engine: bool,
    pub compiler_driver: bool,
    pub compiler: bool,
}

impl Capabilities {
    pub fn all(&self) -> bool {
        self.container_engine && self.compiler_driver && self.compiler
    }
}

/// Probe each tool once and report a found/not-found line per tool.
pub fn probe(toolchain: &Toolchain, runner: &dyn ProcessRunner) -> Capabilities {
    Capabilities {
        container_engine: probe_tool(&toolchain.container_engine, runner),
        compiler_driver: probe_tool(&toolchain.compiler_driver, runner),
        compiler: probe_tool(&toolchain.compiler, runner),
    }
}

fn probe_tool(tool: &str, runner: &dyn ProcessRunner) -> bool {
    let found = runner
        .run(tool, &["--version".to_string()], OutputMode::Suppress)
        .map(|result| result.success)
        .unwrap_or(false);

    if found {
        println!("Found {}!", tool);
    } else {
        println!("Could not exec {}", tool);
    }
    found
}

#[cfg(test)]
mod tests {
    use crate::exec::subprocess::testing::RecordingRunner;

    use super::*;

    #[test]
    fn all_tools_present() {
        let runner = RecordingRunner::new();
        let caps = probe(&Toolchain::default(), &runner);

        assert!(caps.all());

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].program, "docker");
        assert_eq!(calls[1].program, "cargo");
        assert_eq!(calls[2].program, "rustc");
        assert!(calls.iter().all(|c| c.output == OutputMode::Suppress));
    }

    #[test]
    fn missing_tool_is_reported_not_fatal() {
        let runner = RecordingRunner::with_missing(&["docker"]);
        let caps = probe(&Toolchain::default(), &runner);

        assert!(!caps.container_engine);
        assert!(caps.compiler_driver);
        assert!(caps.compiler);
        assert!(!caps.all());
    }

    #[test]
    fn tool_failing_its_version_check_counts_as_absent() {
        let runner = RecordingRunner::with_failing("rustc", 127);
        let caps = probe(&Toolchain::default(), &runner);

        assert!(!caps.compiler);
        assert!(caps.container_engine);
    }

    #[test]
    fn probes_respect_configured_tool_names() {
        let runner = RecordingRunner::new();
        let toolchain = Toolchain {
            container_engine: "podman".to_string(),
            compiler_driver: "cargo".to_string(),
            compiler: "rustc".to_string(),
        };
        probe(&toolchain, &runner);

        assert_eq!(runner.calls.borrow()[0].program, "podman");
    }
}
