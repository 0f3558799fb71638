use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error(transparent)]
    Project(#[from] changeset_project::ProjectError),

    #[error(transparent)]
    Event(#[from] changeset_event::EventError),

    #[error(transparent)]
    Operation(#[from] changeset_operations::OperationError),

    #[error(transparent)]
    MissingChangesetEntries(#[from] changeset_operations::verification::MissingChangesetEntries),

    #[error("failed to create run directory")]
    RunDir(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
