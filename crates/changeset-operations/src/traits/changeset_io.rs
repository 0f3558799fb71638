use changeset_core::ChangesetReport;

use crate::Result;

pub trait ChangesetReader: Send + Sync {
    /// Returns the releases the changeset tool has pending since `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the status command fails or its output is malformed.
    fn read_pending_releases(&self, base: &str) -> Result<ChangesetReport>;
}

impl<T: ChangesetReader + ?Sized> ChangesetReader for Box<T> {
    fn read_pending_releases(&self, base: &str) -> Result<ChangesetReport> {
        (**self).read_pending_releases(base)
    }
}
