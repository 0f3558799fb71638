use std::fs;
use std::path::{Path, PathBuf};

use changeset_core::ChangesetReport;
use changeset_project::GateConfig;
use tracing::{debug, info};

use super::{is_no_changesets_exit, require_clean_exit};
use crate::traits::{ChangesetReader, CommandRunner};
use crate::types::CommandSpec;
use crate::{OperationError, Result};

/// Name of the status file for one run; the run id keeps concurrent runs apart.
#[must_use]
pub fn status_file_name(run_id: &str) -> String {
    format!("changeset-status-{run_id}.json")
}

/// Parses a `changeset status --output` document.
///
/// # Errors
///
/// Returns an error if the file is missing or does not hold a `releases` list.
pub fn read_status_file(path: &Path) -> Result<ChangesetReport> {
    let content = fs::read_to_string(path).map_err(|source| OperationError::StatusFileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| OperationError::StatusFileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Reads pending releases from the JSON file the changeset tool writes.
///
/// The tool resolves `--output` against its working directory even when the
/// path is absolute, so the file is named relative to the project root and
/// read back from `project_root.join(relative_output)`.
pub struct StructuredStatusReader<C> {
    runner: C,
    changeset: Vec<String>,
    check: Vec<String>,
    install: Vec<String>,
    no_changesets_exit_code: Option<i32>,
    relative_output: PathBuf,
    output_path: PathBuf,
}

impl<C: CommandRunner> StructuredStatusReader<C> {
    #[must_use]
    pub fn new(
        runner: C,
        config: &GateConfig,
        project_root: PathBuf,
        relative_output: PathBuf,
    ) -> Self {
        let commands = config.commands();
        let output_path = project_root.join(&relative_output);
        Self {
            runner,
            changeset: commands.changeset().to_vec(),
            check: commands.changeset_check().to_vec(),
            install: commands.changeset_install().to_vec(),
            no_changesets_exit_code: config.no_changesets_exit_code(),
            relative_output,
            output_path,
        }
    }

    /// Where the status file is read from.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn ensure_installed(&self) -> Result<()> {
        let check = CommandSpec::from_argv(&self.check)?;
        if self.runner.run(&check)?.success() {
            debug!(command = %check, "changeset tool present");
            return Ok(());
        }

        let install = CommandSpec::from_argv(&self.install)?;
        info!(command = %install, "changeset tool missing, installing");
        let output = self.runner.run(&install)?;
        if !output.success() {
            return Err(OperationError::ExternalTool {
                command: install.to_string(),
                message: output.failure_text(),
            });
        }
        Ok(())
    }
}

impl<C: CommandRunner> ChangesetReader for StructuredStatusReader<C> {
    fn read_pending_releases(&self, base: &str) -> Result<ChangesetReport> {
        self.ensure_installed()?;
        remove_if_present(&self.output_path)?;

        let command = CommandSpec::from_argv(&self.changeset)?
            .arg("status")
            .arg("--since")
            .arg(base)
            .arg("--output")
            .arg(self.relative_output.to_string_lossy());
        let output = self.runner.run(&command)?;

        if is_no_changesets_exit(&output, self.no_changesets_exit_code) {
            info!(code = ?output.code, "changeset tool reported no changesets");
            return Ok(ChangesetReport::default());
        }
        require_clean_exit(&command, &output)?;

        let report = read_status_file(&self.output_path)?;
        debug!(
            path = %self.output_path.display(),
            releases = report.releases.len(),
            "read changeset status file"
        );

        if let Err(e) = remove_if_present(&self.output_path) {
            debug!(error = %e, "failed to remove changeset status file");
        }

        Ok(report)
    }
}
