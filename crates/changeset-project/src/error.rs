use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("TOML parse error")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to read configuration at '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration at '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("configuration key '{key}' must name a program to run")]
    EmptyCommand { key: &'static str },

    #[error("invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("workspace listing is not a valid JSON envelope")]
    ListingEnvelope(#[source] serde_json::Error),

    #[error("workspace listing payload is not a valid package mapping")]
    ListingPayload(#[source] serde_json::Error),
}
