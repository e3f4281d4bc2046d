//! Container image build and artifact extraction
//!
//! The deploy flow builds a container image from the current directory, then
//! runs that image with `cat` as the entrypoint to stream the compiled
//! release binary out of the image's filesystem onto the host.

use crate::config::{DeployConfig, Toolchain};
use crate::exec::{CommandResult, OutputMode, ProcessRunner};
use crate::utils::terminal;

/// Builds the deployment image and pulls the compiled binary out of it.
pub struct DeployBuilder<'a> {
    toolchain: &'a Toolchain,
    config: DeployConfig,
}

impl<'a> DeployBuilder<'a> {
    pub fn new(toolchain: &'a Toolchain, config: DeployConfig) -> Self {
        Self { toolchain, config }
    }

    /// Build the deployment image from the current directory as context.
    fn build_image(&self, runner: &dyn ProcessRunner, verbose: bool) -> anyhow::Result<CommandResult> {
        let tag = self.config.tag();
        terminal::print_info(&format!("Building image {}", tag));

        let args = vec![
            "build".to_string(),
            ".".to_string(),
            "--tag".to_string(),
            tag,
        ];
        if verbose {
            eprintln!("{} {}", self.toolchain.container_engine, args.join(" "));
        }

        runner.run(&self.toolchain.container_engine, &args, OutputMode::Inherit)
    }

    /// Run the tagged image with its entrypoint overridden to `cat`, writing
    /// the binary from inside the image to the host artifact path.
    fn extract_artifact(&self, runner: &dyn ProcessRunner, verbose: bool) -> anyhow::Result<CommandResult> {
        terminal::print_info(&format!(
            "Extracting {} to {}",
            self.config.image_binary_path,
            self.config.artifact_path.display()
        ));

        let args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "--entrypoint".to_string(),
            "cat".to_string(),
            self.config.tag(),
            self.config.image_binary_path.clone(),
        ];
        if verbose {
            eprintln!(
                "{} {} > {}",
                self.toolchain.container_engine,
                args.join(" "),
                self.config.artifact_path.display()
            );
        }

        runner.run(
            &self.toolchain.container_engine,
            &args,
            OutputMode::ToFile(self.config.artifact_path.clone()),
        )
    }

    /// Image build, then extraction. A failed step stops the flow and its
    /// exit code becomes the dispatcher's own exit code. A partially built
    /// image is left in place; there is no rollback.
    pub fn execute(&self, runner: &dyn ProcessRunner, verbose: bool) -> anyhow::Result<i32> {
        terminal::print_info("Building deployment-ready build...");

        let built = self.build_image(runner, verbose)?;
        if !built.success {
            terminal::print_error(&format!(
                "{} image build failed with status {}",
                self.toolchain.container_engine, built.exit_code
            ));
            return Ok(built.exit_code);
        }

        let extracted = self.extract_artifact(runner, verbose)?;
        if !extracted.success {
            terminal::print_error(&format!(
                "artifact extraction failed with status {}",
                extracted.exit_code
            ));
            return Ok(extracted.exit_code);
        }

        terminal::print_success(&format!(
            "artifact written to {}",
            self.config.artifact_path.display()
        ));
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::exec::subprocess::testing::RecordingRunner;

    use super::*;

    fn deploy_config() -> DeployConfig {
        DeployConfig::resolve(Some("1.2.3"), Path::new("no/such/manifest"))
    }

    #[test]
    fn runs_image_build_then_extraction_in_order() {
        let toolchain = Toolchain::default();
        let runner = RecordingRunner::new();
        let builder = DeployBuilder::new(&toolchain, deploy_config());

        let code = builder.execute(&runner, false).unwrap();
        assert_eq!(code, 0);

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 2);

        assert_eq!(calls[0].program, "docker");
        assert_eq!(calls[0].args, ["build", ".", "--tag", "assemblylift:1.2.3"]);
        assert_eq!(calls[0].output, OutputMode::Inherit);

        assert_eq!(calls[1].program, "docker");
        assert_eq!(
            calls[1].args,
            [
                "run",
                "--rm",
                "--entrypoint",
                "cat",
                "assemblylift:1.2.3",
                "/usr/src/assembly-lift/target/release/bootstrap",
            ]
        );
        assert_eq!(
            calls[1].output,
            OutputMode::ToFile("./bootstrap".into())
        );
    }

    #[test]
    fn failed_image_build_stops_before_extraction() {
        let toolchain = Toolchain::default();
        let runner = RecordingRunner::with_failing("docker", 125);
        let builder = DeployBuilder::new(&toolchain, deploy_config());

        let code = builder.execute(&runner, false).unwrap();
        assert_eq!(code, 125);
        assert_eq!(runner.calls.borrow().len(), 1);
    }
}
