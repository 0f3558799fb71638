use std::fmt;

use changeset_event::{TriggerEvent, resolve_revisions};
use changeset_project::{GateConfig, map_files_to_packages};
use tracing::{debug, info};

use crate::traits::{ChangesetReader, Reporter, WorkspaceProvider};
use crate::verification::rules::CoverageRule;
use crate::verification::{VerificationContext, VerificationEngine, VerificationResult};
use crate::{OperationError, Result};

/// Decodes the `changed_files` input, a JSON array of repository paths.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of strings.
pub fn parse_changed_files(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(OperationError::ChangedFilesParse)
}

pub struct VerifyInput {
    pub changed_files: Vec<String>,
    pub event: TriggerEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoChangedFiles,
    ReleaseBranch { branch: String },
    NoPackages,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChangedFiles => write!(f, "No changed files found. Skipping."),
            Self::ReleaseBranch { .. } => write!(f, "Release PR detected. Skipping."),
            Self::NoPackages => write!(f, "No packages to verify. Skipping."),
        }
    }
}

#[derive(Debug)]
pub enum VerifyOutcome {
    Skipped(SkipReason),
    Passed(VerificationResult),
    Failed(VerificationResult),
}

impl VerifyOutcome {
    /// Skips count as success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

pub struct VerifyOperation<W, R, P> {
    config: GateConfig,
    workspace_provider: W,
    changeset_reader: R,
    reporter: P,
}

impl<W, R, P> VerifyOperation<W, R, P>
where
    W: WorkspaceProvider,
    R: ChangesetReader,
    P: Reporter,
{
    pub fn new(config: GateConfig, workspace_provider: W, changeset_reader: R, reporter: P) -> Self {
        Self {
            config,
            workspace_provider,
            changeset_reader,
            reporter,
        }
    }

    /// Checks that every package touched by `input.changed_files` has a pending
    /// changeset entry.
    ///
    /// A failed check is returned as [`VerifyOutcome::Failed`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the event kind carries no base revision, or if a
    /// collaborator command fails or produces malformed output.
    pub fn execute(&self, input: &VerifyInput) -> Result<VerifyOutcome> {
        if input.changed_files.is_empty() {
            return Ok(self.skip(SkipReason::NoChangedFiles));
        }

        if input
            .event
            .is_release_branch(self.config.release_branch_prefix())
        {
            let branch = input.event.source_branch().unwrap_or_default().to_string();
            return Ok(self.skip(SkipReason::ReleaseBranch { branch }));
        }

        let workspaces = self.workspace_provider.list_workspaces()?;
        let mapping = map_files_to_packages(&workspaces, &input.changed_files, &self.config);
        debug!(
            packages = mapping.package_files.len(),
            unowned = mapping.unowned_files.len(),
            ignored = mapping.ignored_files.len(),
            "mapped changed files"
        );
        for package_files in &mapping.package_files {
            debug!(package = %package_files.package, files = ?package_files.files, "touched package");
        }
        if !mapping.unowned_files.is_empty() {
            debug!(files = ?mapping.unowned_files, "files outside any workspace");
        }

        let touched_packages: Vec<String> = mapping
            .touched_packages()
            .into_iter()
            .map(str::to_string)
            .collect();
        if touched_packages.is_empty() {
            return Ok(self.skip(SkipReason::NoPackages));
        }
        self.reporter.info(&format!(
            "Packages to verify: {}",
            touched_packages.join(", ")
        ));

        let revisions = resolve_revisions(&input.event);
        let Some(base) = revisions.base else {
            return Err(OperationError::UnsupportedEventKind {
                kind: input.event.kind().to_string(),
            });
        };
        info!(base = %base, head = ?revisions.head, "resolved revisions");

        let context = VerificationContext {
            touched_packages,
            base,
        };
        let coverage_rule = CoverageRule::new(&self.changeset_reader);
        let mut engine = VerificationEngine::new();
        engine.add_rule(&coverage_rule);

        let result = engine.verify(&context)?;

        if result.is_success() {
            self.reporter.info("All packages have changeset entries");
            Ok(VerifyOutcome::Passed(result))
        } else {
            info!(missing = ?result.missing_packages, "changeset entries missing");
            Ok(VerifyOutcome::Failed(result))
        }
    }

    fn skip(&self, reason: SkipReason) -> VerifyOutcome {
        info!(reason = ?reason, "skipping verification");
        self.reporter.info(&reason.to_string());
        VerifyOutcome::Skipped(reason)
    }
}
