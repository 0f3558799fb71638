use std::path::Path;

use serde::Deserialize;

use crate::error::EventError;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// One side of a pull request as found in the event payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BranchTip {
    #[serde(default, rename = "ref")]
    pub ref_name: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default)]
    pub base: BranchTip,
    #[serde(default)]
    pub head: BranchTip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushPayload {
    #[serde(default, rename = "ref")]
    pub ref_name: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}

/// Fields of interest across all webhook payload shapes.
#[derive(Debug, Default, Deserialize)]
struct RawPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
    #[serde(flatten)]
    push: PushPayload,
}

/// The event that triggered the CI run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    PullRequest(PullRequestPayload),
    PullRequestTarget(PullRequestPayload),
    Push(PushPayload),
    Other { name: String },
}

impl TriggerEvent {
    /// Builds an event from its name and the raw webhook payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON.
    pub fn from_payload(name: &str, payload: &str) -> Result<Self, EventError> {
        let raw: RawPayload = if payload.trim().is_empty() {
            RawPayload::default()
        } else {
            serde_json::from_str(payload)?
        };
        Ok(Self::from_raw(name, raw))
    }

    /// Reads the payload file written by the CI host, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(name: &str, payload_path: Option<&Path>) -> Result<Self, EventError> {
        let Some(path) = payload_path else {
            return Ok(Self::from_raw(name, RawPayload::default()));
        };

        let content = std::fs::read_to_string(path).map_err(|source| EventError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: RawPayload =
            serde_json::from_str(&content).map_err(|source| EventError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_raw(name, raw))
    }

    fn from_raw(name: &str, raw: RawPayload) -> Self {
        match name {
            "pull_request" => Self::PullRequest(raw.pull_request.unwrap_or_default()),
            "pull_request_target" => Self::PullRequestTarget(raw.pull_request.unwrap_or_default()),
            "push" => Self::Push(raw.push),
            other => Self::Other {
                name: other.to_string(),
            },
        }
    }

    /// The event name as the CI host reports it.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::PullRequest(_) => "pull_request",
            Self::PullRequestTarget(_) => "pull_request_target",
            Self::Push(_) => "push",
            Self::Other { name } => name,
        }
    }

    /// Branch the change comes from: the pull request head branch, or the
    /// pushed branch with its `refs/heads/` prefix removed.
    #[must_use]
    pub fn source_branch(&self) -> Option<&str> {
        match self {
            Self::PullRequest(pr) | Self::PullRequestTarget(pr) => pr.head.ref_name.as_deref(),
            Self::Push(push) => push
                .ref_name
                .as_deref()
                .map(|r| r.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(r)),
            Self::Other { .. } => None,
        }
    }

    #[must_use]
    pub fn is_release_branch(&self, prefix: &str) -> bool {
        !prefix.is_empty()
            && self
                .source_branch()
                .is_some_and(|branch| branch.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PR_PAYLOAD: &str = r#"{
        "number": 1,
        "pull_request": {
            "base": { "ref": "main", "sha": "base-sha" },
            "head": { "ref": "feature/thing", "sha": "head-sha" }
        }
    }"#;

    #[test]
    fn parses_pull_request_payload() -> anyhow::Result<()> {
        let event = TriggerEvent::from_payload("pull_request", PR_PAYLOAD)?;

        let TriggerEvent::PullRequest(pr) = event else {
            panic!("expected pull request event, got {event:?}");
        };
        assert_eq!(pr.base.ref_name.as_deref(), Some("main"));
        assert_eq!(pr.base.sha.as_deref(), Some("base-sha"));
        assert_eq!(pr.head.sha.as_deref(), Some("head-sha"));
        Ok(())
    }

    #[test]
    fn parses_pull_request_target_payload() -> anyhow::Result<()> {
        let event = TriggerEvent::from_payload("pull_request_target", PR_PAYLOAD)?;

        assert!(matches!(event, TriggerEvent::PullRequestTarget(_)));
        assert_eq!(event.kind(), "pull_request_target");
        Ok(())
    }

    #[test]
    fn parses_push_payload() -> anyhow::Result<()> {
        let payload = r#"{"ref":"refs/heads/main","before":"sha0","after":"sha1"}"#;

        let event = TriggerEvent::from_payload("push", payload)?;

        assert_eq!(
            event,
            TriggerEvent::Push(PushPayload {
                ref_name: Some("refs/heads/main".to_string()),
                before: Some("sha0".to_string()),
                after: Some("sha1".to_string()),
            })
        );
        Ok(())
    }

    #[test]
    fn unknown_event_keeps_its_name() -> anyhow::Result<()> {
        let event = TriggerEvent::from_payload("workflow_dispatch", "{}")?;

        assert_eq!(
            event,
            TriggerEvent::Other {
                name: "workflow_dispatch".to_string()
            }
        );
        assert_eq!(event.kind(), "workflow_dispatch");
        Ok(())
    }

    #[test]
    fn pull_request_without_payload_object_is_empty() -> anyhow::Result<()> {
        let event = TriggerEvent::from_payload("pull_request", "")?;

        assert_eq!(event, TriggerEvent::PullRequest(PullRequestPayload::default()));
        Ok(())
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result = TriggerEvent::from_payload("push", "{not json");

        assert!(matches!(result, Err(EventError::InvalidPayload(_))));
    }

    #[test]
    fn source_branch_for_pull_request_is_head_ref() -> anyhow::Result<()> {
        let event = TriggerEvent::from_payload("pull_request", PR_PAYLOAD)?;

        assert_eq!(event.source_branch(), Some("feature/thing"));
        Ok(())
    }

    #[test]
    fn source_branch_for_push_strips_heads_prefix() -> anyhow::Result<()> {
        let event =
            TriggerEvent::from_payload("push", r#"{"ref":"refs/heads/changeset-release/main"}"#)?;

        assert_eq!(event.source_branch(), Some("changeset-release/main"));
        Ok(())
    }

    #[test]
    fn release_branch_detected_by_prefix() -> anyhow::Result<()> {
        let event = TriggerEvent::from_payload(
            "pull_request",
            r#"{"pull_request":{"head":{"ref":"changeset-release/main","sha":"x"}}}"#,
        )?;

        assert!(event.is_release_branch("changeset-release/"));
        assert!(!event.is_release_branch("release-please/"));
        Ok(())
    }

    #[test]
    fn empty_prefix_never_matches() -> anyhow::Result<()> {
        let event = TriggerEvent::from_payload("pull_request", PR_PAYLOAD)?;

        assert!(!event.is_release_branch(""));
        Ok(())
    }

    #[test]
    fn other_events_are_never_release_branches() {
        let event = TriggerEvent::Other {
            name: "schedule".to_string(),
        };

        assert!(!event.is_release_branch("changeset-release/"));
    }

    #[test]
    fn load_reads_payload_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("event.json");
        fs::write(&path, PR_PAYLOAD)?;

        let event = TriggerEvent::load("pull_request", Some(&path))?;

        assert_eq!(event.source_branch(), Some("feature/thing"));
        Ok(())
    }

    #[test]
    fn load_without_path_yields_empty_payload() -> anyhow::Result<()> {
        let event = TriggerEvent::load("push", None)?;

        assert_eq!(event, TriggerEvent::Push(PushPayload::default()));
        Ok(())
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let result = TriggerEvent::load("push", Some(Path::new("/nonexistent/event.json")));

        let err = result.expect_err("missing file should fail");
        assert!(matches!(err, EventError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/event.json"));
    }

    #[test]
    fn load_reports_malformed_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("event.json");
        fs::write(&path, "[1, 2")?;

        let result = TriggerEvent::load("push", Some(&path));

        assert!(matches!(result, Err(EventError::Parse { .. })));
        Ok(())
    }
}
