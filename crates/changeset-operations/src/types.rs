use std::fmt;

use crate::{OperationError, Result};

/// A program invocation, independent of how it gets executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Builds a command from a configured argument vector.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::EmptyCommand`] if `argv` is empty.
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, args) = argv.split_first().ok_or(OperationError::EmptyCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Text describing why the command failed, preferring the tool's own words.
    #[must_use]
    pub fn failure_text(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn from_argv_splits_program_and_args() -> anyhow::Result<()> {
        let spec = CommandSpec::from_argv(&argv(&["yarn", "changeset"]))?.arg("status");

        assert_eq!(spec.program, "yarn");
        assert_eq!(spec.args, argv(&["changeset", "status"]));
        assert_eq!(spec.to_string(), "yarn changeset status");
        Ok(())
    }

    #[test]
    fn from_argv_rejects_empty() {
        assert!(matches!(
            CommandSpec::from_argv(&[]),
            Err(OperationError::EmptyCommand)
        ));
    }

    #[test]
    fn failure_text_prefers_stderr() {
        let output = CommandOutput {
            code: Some(2),
            stdout: "partial".to_string(),
            stderr: "  boom \n".to_string(),
        };

        assert_eq!(output.failure_text(), "boom");
    }

    #[test]
    fn failure_text_falls_back_to_status() {
        let exited = CommandOutput {
            code: Some(3),
            ..CommandOutput::default()
        };
        let killed = CommandOutput::default();

        assert_eq!(exited.failure_text(), "exited with status 3");
        assert_eq!(killed.failure_text(), "terminated by signal");
    }
}
