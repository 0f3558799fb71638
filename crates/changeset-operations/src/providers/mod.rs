mod process;
mod status_file;
mod status_text;
mod workspace;

use std::path::PathBuf;

use changeset_core::ReaderMode;
use changeset_project::GateConfig;

pub use process::ProcessCommandRunner;
pub use status_file::{StructuredStatusReader, read_status_file, status_file_name};
pub use status_text::{BULLET_MARKER, LegacyStatusReader, parse_legacy_status};
pub use workspace::CommandWorkspaceProvider;

use crate::traits::{ChangesetReader, CommandRunner};
use crate::types::{CommandOutput, CommandSpec};
use crate::{OperationError, Result};

/// Builds the reader for the configured output mode.
///
/// `status_file` is relative to `project_root` and only used by the
/// structured reader.
pub fn select_reader<'a, C: CommandRunner + 'a>(
    mode: ReaderMode,
    runner: C,
    config: &GateConfig,
    project_root: PathBuf,
    status_file: PathBuf,
) -> Box<dyn ChangesetReader + 'a> {
    match mode {
        ReaderMode::Structured => Box::new(StructuredStatusReader::new(
            runner,
            config,
            project_root,
            status_file,
        )),
        ReaderMode::Legacy => Box::new(LegacyStatusReader::new(runner, config)),
    }
}

/// Any stderr output counts as failure, even with a zero exit.
pub(crate) fn require_clean_exit(command: &CommandSpec, output: &CommandOutput) -> Result<()> {
    if output.success() && output.stderr.trim().is_empty() {
        return Ok(());
    }
    Err(OperationError::ExternalTool {
        command: command.to_string(),
        message: output.failure_text(),
    })
}

/// Text the changeset tool prints when changed packages have no changesets.
pub const NO_CHANGESETS_MESSAGE: &str = "no changesets were found";

/// Matches the configured exit code together with the tool's no-changesets
/// message; a crash exiting with the same code is an ordinary failure.
pub(crate) fn is_no_changesets_exit(output: &CommandOutput, code: Option<i32>) -> bool {
    let code_matches = match (output.code, code) {
        (Some(actual), Some(expected)) => actual != 0 && actual == expected,
        _ => false,
    };
    code_matches
        && [&output.stderr, &output.stdout]
            .iter()
            .any(|text| text.to_ascii_lowercase().contains(NO_CHANGESETS_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> CommandSpec {
        CommandSpec {
            program: "yarn".to_string(),
            args: vec!["changeset".to_string()],
        }
    }

    #[test]
    fn clean_exit_passes() {
        let output = CommandOutput {
            code: Some(0),
            stdout: "ok".to_string(),
            stderr: "  \n".to_string(),
        };

        assert!(require_clean_exit(&spec(), &output).is_ok());
    }

    #[test]
    fn stderr_with_zero_exit_fails() {
        let output = CommandOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: "warning: something".to_string(),
        };

        let err = require_clean_exit(&spec(), &output).expect_err("stderr should fail");

        assert_eq!(err.to_string(), "warning: something");
    }

    fn exit(code: i32, stderr: &str) -> CommandOutput {
        CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    const NO_CHANGESETS: &str = "🦋  error Some packages have been changed but no changesets were found. \
                                 Run `changeset add` to resolve this error.";

    #[test]
    fn no_changesets_exit_requires_matching_nonzero_code() {
        assert!(is_no_changesets_exit(&exit(1, NO_CHANGESETS), Some(1)));
        assert!(!is_no_changesets_exit(&exit(1, NO_CHANGESETS), Some(2)));
        assert!(!is_no_changesets_exit(&exit(1, NO_CHANGESETS), None));
        assert!(!is_no_changesets_exit(&exit(0, NO_CHANGESETS), Some(0)));
        assert!(!is_no_changesets_exit(&CommandOutput::default(), Some(1)));
    }

    #[test]
    fn crash_with_same_exit_code_is_not_no_changesets() {
        let crash = exit(
            1,
            "Error: Failed to find where HEAD diverged from \"main\". Does \"main\" exist?",
        );

        assert!(!is_no_changesets_exit(&crash, Some(1)));
    }

    #[test]
    fn no_changesets_message_may_arrive_on_stdout() {
        let output = CommandOutput {
            code: Some(1),
            stdout: "Some packages have been changed but No Changesets Were Found.".to_string(),
            stderr: String::new(),
        };

        assert!(is_no_changesets_exit(&output, Some(1)));
    }
}
