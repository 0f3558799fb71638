use changeset_core::ReaderMode;
use serde::Deserialize;

/// On-disk shape of `.changeset/verify.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    #[serde(default, rename = "release-branch-prefix")]
    pub(crate) release_branch_prefix: Option<String>,
    #[serde(default)]
    pub(crate) reader: Option<ReaderMode>,
    #[serde(default, rename = "ignored-files")]
    pub(crate) ignored_files: Vec<String>,
    #[serde(default, rename = "no-changesets-exit-code")]
    pub(crate) no_changesets_exit_code: Option<ExitCodeSetting>,
    #[serde(default)]
    pub(crate) commands: Option<CommandsSection>,
}

/// Either an explicit exit code or `false` to treat every failure as an error.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(untagged)]
pub(crate) enum ExitCodeSetting {
    Code(i32),
    Enabled(bool),
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct CommandsSection {
    #[serde(default)]
    pub(crate) workspaces: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) changeset: Option<Vec<String>>,
    #[serde(default, rename = "changeset-check")]
    pub(crate) changeset_check: Option<Vec<String>>,
    #[serde(default, rename = "changeset-install")]
    pub(crate) changeset_install: Option<Vec<String>>,
}
