mod config;
mod error;
mod listing;
mod manifest;
mod mapping;

pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";
pub const CONFIG_FILE_NAME: &str = "verify.toml";

pub use config::{
    CommandsConfig, DEFAULT_NO_CHANGESETS_EXIT_CODE, GateConfig, default_config_path,
    load_gate_config, parse_gate_config,
};
pub use error::ProjectError;
pub use listing::parse_workspace_listing;
pub use mapping::{
    FileMapping, PackageFiles, WorkspaceIndex, map_files_to_packages, normalize_location,
    resolve_package,
};

pub type Result<T> = std::result::Result<T, ProjectError>;
