use changeset_core::{BumpType, ChangesetReport, ReleaseEntry};
use changeset_project::GateConfig;
use tracing::{debug, info};

use super::{is_no_changesets_exit, require_clean_exit};
use crate::Result;
use crate::traits::{ChangesetReader, CommandRunner};
use crate::types::CommandSpec;

/// Prefix of each package line in the tool's pretty-printed status.
pub const BULLET_MARKER: &str = "🦋  - ";

const GROUP_HEADER: &str = "Packages to be bumped at ";

/// Extracts pending releases from pretty-printed `changeset status` output.
///
/// Lines that are neither bullets nor group headers are dropped, so output
/// the tool reshapes in future versions may lose entries silently.
#[must_use]
pub fn parse_legacy_status(stdout: &str) -> ChangesetReport {
    let mut bump_type = BumpType::Patch;
    let mut releases = Vec::new();

    for line in stdout.lines().map(str::trim) {
        if let Some(name) = line.strip_prefix(BULLET_MARKER) {
            let name = name.trim();
            if !name.is_empty() {
                releases.push(ReleaseEntry::new(name, bump_type));
            }
        } else if let Some((_, severity)) = line.split_once(GROUP_HEADER) {
            match severity.trim().trim_end_matches(':').parse() {
                Ok(parsed) => bump_type = parsed,
                Err(e) => debug!(error = %e, "ignoring unrecognized bump group"),
            }
        }
    }

    ChangesetReport::new(releases)
}

/// Reads pending releases by scraping the tool's human-readable output.
pub struct LegacyStatusReader<C> {
    runner: C,
    changeset: Vec<String>,
    no_changesets_exit_code: Option<i32>,
}

impl<C: CommandRunner> LegacyStatusReader<C> {
    #[must_use]
    pub fn new(runner: C, config: &GateConfig) -> Self {
        Self {
            runner,
            changeset: config.commands().changeset().to_vec(),
            no_changesets_exit_code: config.no_changesets_exit_code(),
        }
    }
}

impl<C: CommandRunner> ChangesetReader for LegacyStatusReader<C> {
    fn read_pending_releases(&self, base: &str) -> Result<ChangesetReport> {
        let command = CommandSpec::from_argv(&self.changeset)?
            .arg("status")
            .arg("--since")
            .arg(base);
        let output = self.runner.run(&command)?;

        if is_no_changesets_exit(&output, self.no_changesets_exit_code) {
            info!(code = ?output.code, "changeset tool reported no changesets");
            return Ok(ChangesetReport::default());
        }
        require_clean_exit(&command, &output)?;

        let report = parse_legacy_status(&output.stdout);
        debug!(releases = report.releases.len(), "scraped changeset status");
        Ok(report)
    }
}
