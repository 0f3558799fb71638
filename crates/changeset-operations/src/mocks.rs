use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use changeset_core::{ChangesetReport, ReleaseEntry, WorkspaceEntry, Workspaces};

use crate::traits::{ChangesetReader, CommandRunner, Reporter, WorkspaceProvider};
use crate::types::{CommandOutput, CommandSpec};
use crate::{OperationError, Result};

/// Builds the stdout of `yarn --silent workspaces --json info`.
#[must_use]
pub fn workspace_listing(entries: &[(&str, &str)]) -> String {
    let data: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(name, location)| {
            (
                (*name).to_string(),
                serde_json::json!({ "location": location, "workspaceDependencies": [] }),
            )
        })
        .collect();
    let envelope = serde_json::json!({
        "type": "log",
        "data": serde_json::Value::Object(data).to_string(),
    });
    envelope.to_string()
}

#[must_use]
pub fn workspaces(entries: &[(&str, &str)]) -> Workspaces {
    entries
        .iter()
        .map(|(name, location)| {
            (
                (*name).to_string(),
                WorkspaceEntry {
                    name: (*name).to_string(),
                    location: (*location).to_string(),
                },
            )
        })
        .collect()
}

#[derive(Default)]
struct RunnerState {
    outputs: VecDeque<CommandOutput>,
    invocations: Vec<String>,
    file_writes: Vec<(usize, PathBuf, String)>,
}

/// Replays queued outputs in order; once drained, every command succeeds silently.
#[derive(Clone, Default)]
pub struct MockCommandRunner {
    state: Arc<Mutex<RunnerState>>,
}

impl MockCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output(self, output: CommandOutput) -> Self {
        self.state
            .lock()
            .expect("runner state lock")
            .outputs
            .push_back(output);
        self
    }

    #[must_use]
    pub fn with_stdout(self, stdout: &str) -> Self {
        self.with_output(CommandOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    /// Writes `content` to `path` when the invocation at `index` runs.
    #[must_use]
    pub fn writing_file(self, index: usize, path: PathBuf, content: &str) -> Self {
        self.state
            .lock()
            .expect("runner state lock")
            .file_writes
            .push((index, path, content.to_string()));
        self
    }

    #[must_use]
    pub fn invocations(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("runner state lock")
            .invocations
            .clone()
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        let mut state = self.state.lock().expect("runner state lock");
        let index = state.invocations.len();
        state.invocations.push(command.to_string());

        for (at, path, content) in &state.file_writes {
            if *at == index {
                std::fs::write(path, content)?;
            }
        }

        Ok(state.outputs.pop_front().unwrap_or(CommandOutput {
            code: Some(0),
            ..CommandOutput::default()
        }))
    }
}

#[derive(Clone)]
pub struct MockWorkspaceProvider {
    workspaces: Workspaces,
    fail_with: Option<String>,
    calls: Arc<Mutex<usize>>,
}

impl MockWorkspaceProvider {
    #[must_use]
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            workspaces: workspaces(entries),
            fail_with: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            workspaces: Workspaces::default(),
            fail_with: Some(message.to_string()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

impl WorkspaceProvider for MockWorkspaceProvider {
    fn list_workspaces(&self) -> Result<Workspaces> {
        *self.calls.lock().expect("calls lock") += 1;
        match &self.fail_with {
            Some(message) => Err(OperationError::ExternalTool {
                command: "workspaces".to_string(),
                message: message.clone(),
            }),
            None => Ok(self.workspaces.clone()),
        }
    }
}

#[derive(Clone)]
pub struct MockChangesetReader {
    report: ChangesetReport,
    fail_with: Option<String>,
    bases: Arc<Mutex<Vec<String>>>,
}

impl MockChangesetReader {
    #[must_use]
    pub fn with_packages(names: &[&str]) -> Self {
        Self::with_report(ChangesetReport::new(
            names
                .iter()
                .map(|name| ReleaseEntry::new(*name, changeset_core::BumpType::Patch))
                .collect(),
        ))
    }

    #[must_use]
    pub fn with_report(report: ChangesetReport) -> Self {
        Self {
            report,
            fail_with: None,
            bases: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            report: ChangesetReport::default(),
            fail_with: Some(message.to_string()),
            bases: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn requested_bases(&self) -> Vec<String> {
        self.bases.lock().expect("bases lock").clone()
    }
}

impl ChangesetReader for MockChangesetReader {
    fn read_pending_releases(&self, base: &str) -> Result<ChangesetReport> {
        self.bases.lock().expect("bases lock").push(base.to_string());
        match &self.fail_with {
            Some(message) => Err(OperationError::ExternalTool {
                command: "changeset status".to_string(),
                message: message.clone(),
            }),
            None => Ok(self.report.clone()),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("messages lock").clone()
    }
}

impl Reporter for MockReporter {
    fn info(&self, message: &str) {
        self.messages
            .lock()
            .expect("messages lock")
            .push(message.to_string());
    }
}
