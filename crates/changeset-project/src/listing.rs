use changeset_core::{WorkspaceEntry, Workspaces};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ProjectError;
use crate::mapping::normalize_location;

/// Outer object printed by `yarn workspaces --json info`.
#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    /// The package mapping, itself serialized as a JSON string.
    data: String,
}

#[derive(Debug, Deserialize)]
struct WorkspaceInfo {
    location: String,
}

/// Decodes the workspace listing.
///
/// The listing is double-encoded: the envelope's `data` field holds a JSON
/// string which decodes to `{ "<name>": { "location": "<dir>", ... } }`.
/// Entries keep the order of the listing.
///
/// # Errors
///
/// Returns an error if either layer is not valid JSON or an entry has no
/// `location`.
pub fn parse_workspace_listing(stdout: &str) -> Result<Workspaces, ProjectError> {
    let envelope: ListingEnvelope =
        serde_json::from_str(stdout.trim()).map_err(ProjectError::ListingEnvelope)?;

    let infos: IndexMap<String, WorkspaceInfo> =
        serde_json::from_str(&envelope.data).map_err(ProjectError::ListingPayload)?;

    Ok(infos
        .into_iter()
        .map(|(name, info)| {
            let entry = WorkspaceEntry {
                name: name.clone(),
                location: normalize_location(&info.location),
            };
            (name, entry)
        })
        .collect())
}
