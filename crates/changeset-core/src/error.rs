use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangesetError {
    #[error("invalid bump type '{0}' (expected major, minor or patch)")]
    InvalidBumpType(String),
}

pub type Result<T> = std::result::Result<T, ChangesetError>;
