use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use indexmap::IndexMap;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::ChangesetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Listed in the release plan without a version change.
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

impl FromStr for BumpType {
    type Err = ChangesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            _ => Err(ChangesetError::InvalidBumpType(s.to_string())),
        }
    }
}

/// How the pending releases are obtained from the changeset tool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReaderMode {
    /// Ask the tool for a JSON status file.
    #[default]
    Structured,
    /// Scrape the human-readable status output.
    Legacy,
}

impl fmt::Display for ReaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

/// One package the changeset tool intends to release.
///
/// Only `name` takes part in verification; the remaining fields are carried
/// through as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub bump_type: BumpType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_version: Option<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_sets: Option<Vec<String>>,
}

impl ReleaseEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, bump_type: BumpType) -> Self {
        Self {
            name: name.into(),
            bump_type,
            old_version: None,
            change_sets: None,
        }
    }
}

/// Pending releases in the order the tool reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesetReport {
    pub releases: Vec<ReleaseEntry>,
}

impl ChangesetReport {
    #[must_use]
    pub fn new(releases: Vec<ReleaseEntry>) -> Self {
        Self { releases }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.releases.iter().any(|release| release.name == package)
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.releases.iter().map(|release| release.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEntry {
    pub name: String,
    /// Root directory relative to the repository, without `./` or trailing `/`.
    pub location: String,
}

/// Workspace packages keyed by name, in listing order.
pub type Workspaces = IndexMap<String, WorkspaceEntry>;
