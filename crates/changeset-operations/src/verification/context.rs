/// Inputs to a verification pass once the run has not been skipped.
#[derive(Debug, Clone)]
pub struct VerificationContext {
    /// Packages owning at least one changed file, in first-seen order.
    pub touched_packages: Vec<String>,
    /// Revision the pending releases are compared against.
    pub base: String,
}
