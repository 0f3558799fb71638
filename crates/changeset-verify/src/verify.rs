use std::path::{Path, PathBuf};

use changeset_core::ReaderMode;
use changeset_event::TriggerEvent;
use changeset_operations::operations::{
    VerifyInput, VerifyOperation, VerifyOutcome, parse_changed_files,
};
use changeset_operations::providers::{
    CommandWorkspaceProvider, ProcessCommandRunner, select_reader, status_file_name,
};
use changeset_project::load_gate_config;
use tracing::debug;

use crate::error::{CliError, Result};
use crate::output::ConsoleReporter;

pub(crate) struct VerifyArgs {
    pub(crate) changed_files: String,
    pub(crate) event_name: String,
    pub(crate) event_path: Option<PathBuf>,
    pub(crate) run_id: String,
    pub(crate) reader: Option<ReaderMode>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) quiet: bool,
}

pub(crate) fn run(args: &VerifyArgs, root: &Path) -> Result<()> {
    let mut config = load_gate_config(root, args.config.as_deref())?;
    if let Some(mode) = args.reader {
        config = config.with_reader(mode);
    }

    let changed_files = parse_changed_files(&args.changed_files)?;
    let event = TriggerEvent::load(&args.event_name, args.event_path.as_deref())?;
    debug!(
        event = event.kind(),
        files = changed_files.len(),
        reader = %config.reader(),
        "starting verification"
    );

    // Removed on drop, taking the status file with it. Lives under the
    // project root since the changeset tool only writes relative to it.
    let run_dir = tempfile::Builder::new()
        .prefix(".changeset-verify-")
        .tempdir_in(root)
        .map_err(CliError::RunDir)?;
    let run_dir_name = run_dir.path().file_name().ok_or_else(|| {
        CliError::RunDir(std::io::Error::other("run directory has no name"))
    })?;

    let runner = ProcessCommandRunner::new(root);
    let workspace_provider =
        CommandWorkspaceProvider::new(runner.clone(), config.commands().workspaces().to_vec());
    let reader = select_reader(
        config.reader(),
        runner,
        &config,
        root.to_path_buf(),
        Path::new(run_dir_name).join(status_file_name(&args.run_id)),
    );
    let reporter = ConsoleReporter::new(args.quiet);

    let operation = VerifyOperation::new(config, workspace_provider, reader, reporter);
    let outcome = operation.execute(&VerifyInput {
        changed_files,
        event,
    })?;

    match outcome {
        VerifyOutcome::Skipped(_) | VerifyOutcome::Passed(_) => Ok(()),
        VerifyOutcome::Failed(result) => match result.missing_entries() {
            Some(missing) => Err(missing.into()),
            None => Ok(()),
        },
    }
}
