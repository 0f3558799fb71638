use super::{VerificationContext, VerificationResult, VerificationRule};
use crate::Result;
use crate::traits::ChangesetReader;

/// Every touched package needs a pending release entry.
pub struct CoverageRule<'a, R: ChangesetReader + ?Sized> {
    reader: &'a R,
}

impl<'a, R: ChangesetReader + ?Sized> CoverageRule<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self { reader }
    }
}

impl<R: ChangesetReader + ?Sized> VerificationRule for CoverageRule<'_, R> {
    fn check(&self, context: &VerificationContext, result: &mut VerificationResult) -> Result<()> {
        let report = self.reader.read_pending_releases(&context.base)?;

        let (covered, missing) = context
            .touched_packages
            .iter()
            .cloned()
            .partition(|name| report.contains(name));
        result.covered_packages = covered;
        result.missing_packages = missing;
        result.report = report;

        Ok(())
    }
}
