use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::traits::CommandRunner;
use crate::types::{CommandOutput, CommandSpec};
use crate::{OperationError, Result};

/// Runs commands as child processes in a fixed working directory.
#[derive(Debug, Clone)]
pub struct ProcessCommandRunner {
    working_dir: PathBuf,
}

impl ProcessCommandRunner {
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        debug!(
            command = %command,
            cwd = %self.working_dir.display(),
            "running external command"
        );

        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| OperationError::CommandSpawn {
                command: command.to_string(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(
            command = %command,
            code = ?result.code,
            stdout = %result.stdout.trim(),
            stderr = %result.stderr.trim(),
            "external command finished"
        );

        Ok(result)
    }
}
