use async_trait::async_trait;
use awxsync_shared::models::{DesiredTemplate, SurveySpec};

use crate::ApiError;
use crate::models::{ExistingSurvey, JobTemplate};

/// The job template operations a sync run needs from AWX.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// First job template whose name matches exactly.
    async fn find_template(&self, name: &str) -> Result<Option<JobTemplate>, ApiError>;

    async fn get_template(&self, id: i64) -> Result<JobTemplate, ApiError>;

    async fn create_template(&self, template: &DesiredTemplate) -> Result<JobTemplate, ApiError>;

    async fn update_template(
        &self,
        id: i64,
        template: &DesiredTemplate,
    ) -> Result<JobTemplate, ApiError>;

    async fn link_credential(&self, template_id: i64, credential_id: i64) -> Result<(), ApiError>;

    /// Starts a project update (SCM sync).
    async fn trigger_refresh(&self, project_id: i64) -> Result<(), ApiError>;

    async fn project_status(&self, project_id: i64) -> Result<Option<String>, ApiError>;

    async fn get_survey(&self, template_id: i64) -> Result<ExistingSurvey, ApiError>;

    /// Replaces the template's survey wholesale.
    async fn replace_survey(&self, template_id: i64, survey: &SurveySpec) -> Result<(), ApiError>;

    async fn enable_survey(&self, template_id: i64) -> Result<JobTemplate, ApiError>;
}
