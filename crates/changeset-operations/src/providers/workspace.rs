use changeset_core::Workspaces;
use changeset_project::parse_workspace_listing;
use tracing::debug;

use super::require_clean_exit;
use crate::Result;
use crate::traits::{CommandRunner, WorkspaceProvider};
use crate::types::CommandSpec;

/// Lists workspaces by running the package manager's JSON listing command.
pub struct CommandWorkspaceProvider<C> {
    runner: C,
    command: Vec<String>,
}

impl<C: CommandRunner> CommandWorkspaceProvider<C> {
    #[must_use]
    pub fn new(runner: C, command: Vec<String>) -> Self {
        Self { runner, command }
    }
}

impl<C: CommandRunner> WorkspaceProvider for CommandWorkspaceProvider<C> {
    fn list_workspaces(&self) -> Result<Workspaces> {
        let command = CommandSpec::from_argv(&self.command)?;
        let output = self.runner.run(&command)?;
        require_clean_exit(&command, &output)?;

        let workspaces = parse_workspace_listing(&output.stdout)?;
        debug!(count = workspaces.len(), "decoded workspace listing");
        Ok(workspaces)
    }
}
