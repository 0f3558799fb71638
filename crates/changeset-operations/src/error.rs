use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Project(#[from] changeset_project::ProjectError),

    #[error(
        "This action only supports pull requests and pushes, {kind} events are not supported. \
         Please submit an issue on this action's GitHub repo if you believe this is correct."
    )]
    UnsupportedEventKind { kind: String },

    /// The tool's own error text, reported as-is.
    #[error("{message}")]
    ExternalTool { command: String, message: String },

    #[error("failed to run '{command}'")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command must name a program to run")]
    EmptyCommand,

    #[error("changed files input is not a JSON array of paths")]
    ChangedFilesParse(#[source] serde_json::Error),

    #[error("failed to read changeset status file '{path}'")]
    StatusFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse changeset status file '{path}'")]
    StatusFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OperationError>;
