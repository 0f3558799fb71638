use std::path::{Path, PathBuf};

use changeset_core::ReaderMode;
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::ProjectError;
use crate::manifest::{CommandsSection, ConfigFile, ExitCodeSetting};

/// Exit code `changeset status` uses when packages changed but no changesets exist.
pub const DEFAULT_NO_CHANGESETS_EXIT_CODE: i32 = 1;

const DEFAULT_WORKSPACES_COMMAND: &[&str] = &["yarn", "--silent", "workspaces", "--json", "info"];
const DEFAULT_CHANGESET_COMMAND: &[&str] = &["yarn", "changeset"];
const DEFAULT_CHANGESET_CHECK_COMMAND: &[&str] = &["yarn", "changeset", "--version"];
const DEFAULT_CHANGESET_INSTALL_COMMAND: &[&str] =
    &["yarn", "add", "--dev", "-W", "@changesets/cli"];

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}

/// Argument vectors for the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandsConfig {
    workspaces: Vec<String>,
    changeset: Vec<String>,
    changeset_check: Vec<String>,
    changeset_install: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            workspaces: argv(DEFAULT_WORKSPACES_COMMAND),
            changeset: argv(DEFAULT_CHANGESET_COMMAND),
            changeset_check: argv(DEFAULT_CHANGESET_CHECK_COMMAND),
            changeset_install: argv(DEFAULT_CHANGESET_INSTALL_COMMAND),
        }
    }
}

impl CommandsConfig {
    /// Lists workspace packages as a JSON envelope.
    #[must_use]
    pub fn workspaces(&self) -> &[String] {
        &self.workspaces
    }

    /// Prefix for changeset tool subcommands (`status` is appended).
    #[must_use]
    pub fn changeset(&self) -> &[String] {
        &self.changeset
    }

    #[must_use]
    pub fn changeset_check(&self) -> &[String] {
        &self.changeset_check
    }

    #[must_use]
    pub fn changeset_install(&self) -> &[String] {
        &self.changeset_install
    }
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    release_branch_prefix: String,
    reader: ReaderMode,
    ignored_files: GlobSet,
    no_changesets_exit_code: Option<i32>,
    commands: CommandsConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            release_branch_prefix: changeset_event::DEFAULT_RELEASE_BRANCH_PREFIX.to_string(),
            reader: ReaderMode::default(),
            ignored_files: GlobSet::empty(),
            no_changesets_exit_code: Some(DEFAULT_NO_CHANGESETS_EXIT_CODE),
            commands: CommandsConfig::default(),
        }
    }
}

impl GateConfig {
    #[must_use]
    pub fn release_branch_prefix(&self) -> &str {
        &self.release_branch_prefix
    }

    #[must_use]
    pub fn reader(&self) -> ReaderMode {
        self.reader
    }

    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignored_files.is_match(path)
    }

    #[must_use]
    pub fn no_changesets_exit_code(&self) -> Option<i32> {
        self.no_changesets_exit_code
    }

    #[must_use]
    pub fn commands(&self) -> &CommandsConfig {
        &self.commands
    }

    #[must_use]
    pub fn with_reader(mut self, reader: ReaderMode) -> Self {
        self.reader = reader;
        self
    }

    #[must_use]
    pub fn with_release_branch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.release_branch_prefix = prefix.into();
        self
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ProjectError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ProjectError::GlobPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ProjectError::GlobPattern {
        pattern: patterns.join(", "),
        source,
    })
}

fn command_or_default(
    value: Option<Vec<String>>,
    default: Vec<String>,
    key: &'static str,
) -> Result<Vec<String>, ProjectError> {
    match value {
        None => Ok(default),
        Some(parts) if parts.first().is_none_or(|program| program.trim().is_empty()) => {
            Err(ProjectError::EmptyCommand { key })
        }
        Some(parts) => Ok(parts),
    }
}

fn build_commands_config(section: Option<CommandsSection>) -> Result<CommandsConfig, ProjectError> {
    let defaults = CommandsConfig::default();
    let Some(section) = section else {
        return Ok(defaults);
    };

    Ok(CommandsConfig {
        workspaces: command_or_default(
            section.workspaces,
            defaults.workspaces,
            "commands.workspaces",
        )?,
        changeset: command_or_default(section.changeset, defaults.changeset, "commands.changeset")?,
        changeset_check: command_or_default(
            section.changeset_check,
            defaults.changeset_check,
            "commands.changeset-check",
        )?,
        changeset_install: command_or_default(
            section.changeset_install,
            defaults.changeset_install,
            "commands.changeset-install",
        )?,
    })
}

fn build_gate_config(file: ConfigFile) -> Result<GateConfig, ProjectError> {
    let defaults = GateConfig::default();

    let no_changesets_exit_code = match file.no_changesets_exit_code {
        None | Some(ExitCodeSetting::Enabled(true)) => defaults.no_changesets_exit_code,
        Some(ExitCodeSetting::Enabled(false)) => None,
        Some(ExitCodeSetting::Code(code)) => Some(code),
    };

    Ok(GateConfig {
        release_branch_prefix: file
            .release_branch_prefix
            .unwrap_or(defaults.release_branch_prefix),
        reader: file.reader.unwrap_or(defaults.reader),
        ignored_files: build_glob_set(&file.ignored_files)?,
        no_changesets_exit_code,
        commands: build_commands_config(file.commands)?,
    })
}

/// Parses a configuration document.
///
/// # Errors
///
/// Returns an error if the document is not valid TOML, contains unknown keys,
/// declares an empty command, or uses an invalid glob pattern.
pub fn parse_gate_config(content: &str) -> Result<GateConfig, ProjectError> {
    let file: ConfigFile = toml::from_str(content)?;
    build_gate_config(file)
}

#[must_use]
pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root
        .join(crate::DEFAULT_CHANGESET_DIR)
        .join(crate::CONFIG_FILE_NAME)
}

/// Loads the gate configuration.
///
/// An explicit path must exist. Without one, `.changeset/verify.toml` under
/// `project_root` is used when present and defaults apply otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_gate_config(
    project_root: &Path,
    explicit_path: Option<&Path>,
) -> Result<GateConfig, ProjectError> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = default_config_path(project_root);
            if !candidate.is_file() {
                return Ok(GateConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ProjectError::ConfigRead {
        path: path.clone(),
        source,
    })?;

    let file: ConfigFile =
        toml::from_str(&content).map_err(|source| ProjectError::ConfigParse {
            path: path.clone(),
            source,
        })?;

    build_gate_config(file)
}
