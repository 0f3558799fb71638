use changeset_core::Workspaces;

use crate::Result;

pub trait WorkspaceProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the listing command fails or its output cannot be decoded.
    fn list_workspaces(&self) -> Result<Workspaces>;
}
