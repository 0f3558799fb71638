use crate::event::TriggerEvent;

/// The two endpoints of the change under verification.
///
/// Either side is `None` when the event does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionPair {
    pub base: Option<String>,
    pub head: Option<String>,
}

impl RevisionPair {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.head.is_none()
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Extracts the base and head revisions from a trigger event.
///
/// Pull request base resolves to the symbolic target branch so the changeset
/// tool computes changes since the branches diverged; the base SHA is only
/// used when the payload carries no branch name.
#[must_use]
pub fn resolve_revisions(event: &TriggerEvent) -> RevisionPair {
    match event {
        TriggerEvent::PullRequest(pr) | TriggerEvent::PullRequestTarget(pr) => RevisionPair {
            base: non_empty(pr.base.ref_name.as_ref())
                .or_else(|| non_empty(pr.base.sha.as_ref())),
            head: non_empty(pr.head.sha.as_ref()),
        },
        TriggerEvent::Push(push) => RevisionPair {
            base: non_empty(push.before.as_ref()),
            head: non_empty(push.after.as_ref()),
        },
        TriggerEvent::Other { .. } => RevisionPair::empty(),
    }
}
