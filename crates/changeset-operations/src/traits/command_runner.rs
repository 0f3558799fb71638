use crate::Result;
use crate::types::{CommandOutput, CommandSpec};

pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion and captures its output.
    ///
    /// A nonzero exit is not an error here; callers decide what it means.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started.
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput>;
}
