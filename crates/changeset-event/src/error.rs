use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to read event payload '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event payload '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("event payload is not valid JSON")]
    InvalidPayload(#[from] serde_json::Error),
}
