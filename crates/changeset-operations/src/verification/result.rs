use changeset_core::ChangesetReport;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    pub touched_packages: Vec<String>,
    pub covered_packages: Vec<String>,
    pub missing_packages: Vec<String>,
    pub report: ChangesetReport,
}

impl VerificationResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.missing_packages.is_empty()
    }

    #[must_use]
    pub fn missing_entries(&self) -> Option<MissingChangesetEntries> {
        if self.is_success() {
            return None;
        }
        Some(MissingChangesetEntries {
            packages: self.missing_packages.clone(),
        })
    }
}

/// Touched packages that have no pending changeset entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Changeset entry required for {} because there have been changes since the last release.",
    packages.join(", ")
)]
pub struct MissingChangesetEntries {
    pub packages: Vec<String>,
}
