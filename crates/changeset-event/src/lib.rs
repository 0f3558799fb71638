mod error;
mod event;
mod revision;

pub use error::EventError;
pub use event::{BranchTip, PullRequestPayload, PushPayload, TriggerEvent};
pub use revision::{RevisionPair, resolve_revisions};

/// Branch prefix used by the changesets release bot for its version PRs.
pub const DEFAULT_RELEASE_BRANCH_PREFIX: &str = "changeset-release/";

pub type Result<T> = std::result::Result<T, EventError>;
