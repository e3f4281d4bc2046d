//! Error types and helpers for user-friendly error messages

use thiserror::Error;

/// Fatal dispatcher errors. Each carries enough context for a single
/// actionable diagnostic line; none are recoverable.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A required external tool is not invocable.
    #[error("Missing tool: {tool} (required for `{required_for}`)")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// A recognized command surface that has no implementation yet.
    #[error("{feature} is not yet implemented")]
    NotImplemented { feature: String },
}

impl BuildError {
    /// Create a missing tool error with an install hint
    pub fn missing_tool(tool: impl Into<String>, required_for: impl Into<String>) -> Self {
        let tool = tool.into();
        let hint = tool_hint(&tool);
        Self::MissingTool {
            tool,
            required_for: required_for.into(),
            hint,
        }
    }

    /// Create a not-implemented error
    pub fn not_implemented(feature: impl Into<String>) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }

    /// Actionable hint for this error, if there is one
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::MissingTool { hint, .. } => Some(hint),
            Self::NotImplemented { .. } => None,
        }
    }
}

/// Install hint for a missing tool.
fn tool_hint(tool: &str) -> String {
    match tool {
        "docker" => {
            "Install Docker from https://docs.docker.com/get-docker/ and make sure the daemon is running"
                .to_string()
        }
        "cargo" | "rustc" => "Install the Rust toolchain via https://rustup.rs".to_string(),
        _ => format!("Install {} and make sure it is on PATH", tool),
    }
}
