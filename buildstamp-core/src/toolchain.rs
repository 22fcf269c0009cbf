//! Toolchain version probing

use std::process::Command;

use tracing::debug;

use crate::error::{Result, StampError};

/// Source of the raw, unparsed toolchain version line.
pub trait ToolchainProbe {
    fn version(&self) -> Result<String>;
}

/// Runs a toolchain binary with its version-reporting arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["version".to_string()],
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn unavailable(&self, reason: impl Into<String>) -> StampError {
        StampError::ToolchainUnavailable {
            program: self.program.clone(),
            reason: reason.into(),
        }
    }
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self::new("go")
    }
}

impl ToolchainProbe for CommandProbe {
    fn version(&self) -> Result<String> {
        debug!(program = %self.program, args = ?self.args, "querying toolchain version");

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|err| self.unavailable(err.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.unavailable(format!("{} {}", output.status, stderr.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Canned version line, for callers that already know the toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedProbe(pub String);

impl ToolchainProbe for FixedProbe {
    fn version(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Drop the trailing platform token and rejoin the rest with single spaces.
///
/// `"go version go1.21.0 linux/amd64\n"` becomes `"go version go1.21.0"`.
pub fn strip_platform(raw: &str) -> String {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    match tokens.split_last() {
        Some((_, rest)) => rest.join(" "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_platform_token() {
        assert_eq!(
            strip_platform("go version go1.15.8 linux/amd64\n"),
            "go version go1.15.8"
        );
        assert_eq!(strip_platform("  a\t b  c "), "a b");
    }

    #[test]
    fn degenerate_outputs_become_empty() {
        assert_eq!(strip_platform(""), "");
        assert_eq!(strip_platform("single\n"), "");
    }

    #[test]
    fn missing_binary_is_unavailable() {
        let probe = CommandProbe::new("buildstamp-no-such-toolchain");
        let err = probe.version().unwrap_err();
        match err {
            StampError::ToolchainUnavailable { program, .. } => {
                assert_eq!(program, "buildstamp-no-such-toolchain")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_unavailable() {
        let probe = CommandProbe::new("false").with_args(Vec::<String>::new());
        assert!(matches!(
            probe.version(),
            Err(StampError::ToolchainUnavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_of_successful_command() {
        let probe = CommandProbe::new("echo").with_args(["tool version 1.0 os/arch"]);
        let raw = probe.version().expect("echo runs");
        assert_eq!(strip_platform(&raw), "tool version 1.0");
    }

    #[test]
    fn default_probe_runs_go_version() {
        let probe = CommandProbe::default();
        assert_eq!(probe.program(), "go");
        assert_eq!(probe.args, vec!["version".to_string()]);
    }
}
