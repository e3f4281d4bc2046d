//! Toolchain and deploy configuration
//!
//! Executable names are injected into the dispatcher rather than referenced
//! as ambient constants, so tests (and unusual hosts) can substitute them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default external tool names.
pub const DEFAULT_CONTAINER_ENGINE: &str = "docker";
pub const DEFAULT_COMPILER_DRIVER: &str = "cargo";
pub const DEFAULT_COMPILER: &str = "rustc";

/// Fallback image tag version when no override and no manifest is available.
const DEFAULT_VERSION: &str = "0.1.0";

/// Name component of the deployment image tag.
const IMAGE_NAME: &str = "assemblylift";

/// Where the release binary lives inside the built image.
const IMAGE_BINARY_PATH: &str = "/usr/src/assembly-lift/target/release/bootstrap";

/// Host path the extracted binary is written to.
const ARTIFACT_PATH: &str = "./bootstrap";

/// Executable names for the external tools the dispatcher drives.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub container_engine: String,
    pub compiler_driver: String,
    pub compiler: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            container_engine: DEFAULT_CONTAINER_ENGINE.to_string(),
            compiler_driver: DEFAULT_COMPILER_DRIVER.to_string(),
            compiler: DEFAULT_COMPILER.to_string(),
        }
    }
}

/// When capability checks happen relative to build-mode dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPolicy {
    /// Each build mode requires only the tools it actually uses.
    PerMode,
    /// Every build mode requires all tools to be present up front.
    AllUpfront,
}

/// Settings for the deploy flow.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub image_name: String,
    pub version: String,
    pub image_binary_path: String,
    pub artifact_path: PathBuf,
}

impl DeployConfig {
    /// Resolve the deploy configuration. Version precedence: explicit
    /// override, then `[package].version` from the project manifest, then
    /// the built-in default.
    pub fn resolve(version_override: Option<&str>, manifest_path: &Path) -> Self {
        let version = version_override
            .map(str::to_string)
            .or_else(|| manifest_version(manifest_path))
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        Self {
            image_name: IMAGE_NAME.to_string(),
            version,
            image_binary_path: IMAGE_BINARY_PATH.to_string(),
            artifact_path: PathBuf::from(ARTIFACT_PATH),
        }
    }

    /// Full image tag, `name:version`.
    pub fn tag(&self) -> String {
        format!("{}:{}", self.image_name, self.version)
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<ManifestPackage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPackage {
    version: Option<String>,
}

/// Read `[package].version` from the project manifest, if it is there. A
/// missing or unparsable manifest is not an error; the caller falls back.
fn manifest_version(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let manifest: Manifest = toml::from_str(&contents).ok()?;
    manifest.package?.version
}
