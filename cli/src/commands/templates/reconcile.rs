use std::fmt;
use std::time::Duration;

use awxsync_api::models::PROJECT_STATUS_SUCCESSFUL;
use awxsync_api::{ApiError, RemoteClient};
use awxsync_shared::models::DesiredTemplate;

/// How long to wait for a project update before syncing templates anyway.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshPolicy {
    pub project_id: i64,
    pub attempts: u32,
    pub interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Created => write!(f, "created"),
            Action::Updated => write!(f, "updated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkFailure {
    pub credential_id: i64,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    pub action: Action,
    pub template_id: i64,
    /// Credentials that could not be associated. The template itself was
    /// still created or updated.
    pub link_failures: Vec<LinkFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Successful,
    TimedOut { last_status: Option<String> },
    TriggerFailed(String),
}

/// Drives AWX job templates toward their desired state, one at a time.
///
/// Templates are matched by name only. Nothing is ever deleted.
pub struct Reconciler<'a, C: RemoteClient + ?Sized> {
    client: &'a C,
    refresh: &'a RefreshPolicy,
}

impl<'a, C: RemoteClient + ?Sized> Reconciler<'a, C> {
    pub fn new(client: &'a C, refresh: &'a RefreshPolicy) -> Self {
        Self { client, refresh }
    }

    /// Creates the template or updates the one with the same name, then
    /// associates its credentials.
    ///
    /// Only lookup, create and update failures are errors; each credential
    /// is linked on a best-effort basis.
    pub async fn reconcile(&self, desired: &DesiredTemplate) -> Result<ReconcileOutcome, ApiError> {
        let existing = self.client.find_template(&desired.name).await?;

        let (action, template_id) = match existing {
            Some(existing) => {
                tracing::debug!(name = %desired.name, id = existing.id, "updating job template");
                self.client.update_template(existing.id, desired).await?;
                (Action::Updated, existing.id)
            }
            None => {
                tracing::debug!(name = %desired.name, "creating job template");
                let created = self.client.create_template(desired).await?;
                (Action::Created, created.id)
            }
        };

        let mut link_failures = Vec::new();
        for &credential_id in &desired.credentials {
            match self.client.link_credential(template_id, credential_id).await {
                Ok(()) => {
                    tracing::debug!(template_id, credential_id, "associated credential");
                }
                Err(e) => {
                    tracing::warn!(
                        template_id,
                        credential_id,
                        error = %e,
                        "could not associate credential"
                    );
                    link_failures.push(LinkFailure {
                        credential_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(ReconcileOutcome {
            action,
            template_id,
            link_failures,
        })
    }

    /// Triggers a project update and polls until it succeeds or the attempts
    /// run out. Never fails the run: a stale project only means AWX may not
    /// know about newly added playbooks yet.
    pub async fn refresh_project(&self) -> RefreshOutcome {
        let project_id = self.refresh.project_id;

        if let Err(e) = self.client.trigger_refresh(project_id).await {
            tracing::warn!(project_id, error = %e, "could not sync project, continuing anyway");
            return RefreshOutcome::TriggerFailed(e.to_string());
        }
        tracing::info!(project_id, "project sync initiated");

        let mut last_status = None;
        for attempt in 1..=self.refresh.attempts {
            tokio::time::sleep(self.refresh.interval).await;
            match self.client.project_status(project_id).await {
                Ok(status) if status.as_deref() == Some(PROJECT_STATUS_SUCCESSFUL) => {
                    tracing::info!(project_id, attempt, "project sync complete");
                    return RefreshOutcome::Successful;
                }
                Ok(status) => {
                    tracing::debug!(project_id, attempt, status = ?status, "project still syncing");
                    last_status = status;
                }
                Err(e) => {
                    tracing::debug!(project_id, attempt, error = %e, "could not read project status");
                }
            }
        }

        tracing::warn!(
            project_id,
            status = ?last_status,
            "project sync may still be running, continuing anyway"
        );
        RefreshOutcome::TimedOut { last_status }
    }
}
