use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use awxsync_api::models::{ExistingSurvey, JobTemplate};
use awxsync_api::{ApiError, RemoteClient};
use awxsync_shared::models::{DesiredTemplate, SurveySpec};

pub fn desired(name: &str) -> DesiredTemplate {
    DesiredTemplate {
        name: name.to_string(),
        description: name.to_string(),
        job_type: "run".to_string(),
        inventory: 2,
        project: 8,
        playbook: "playbooks/esphome/test.yaml".to_string(),
        ask_variables_on_launch: true,
        extra_vars: "{}\n".to_string(),
        execution_environment: None,
        ask_limit_on_launch: None,
        credentials: Vec::new(),
        hosts: "localhost".to_string(),
    }
}

fn rejected(message: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        body: message.to_string(),
    }
}

/// In-memory AWX that records every call it receives.
#[derive(Default)]
pub struct FakeRemote {
    templates: Mutex<Vec<JobTemplate>>,
    bodies: Mutex<Vec<DesiredTemplate>>,
    links: Mutex<Vec<(i64, i64)>>,
    calls: Mutex<Vec<String>>,
    project_statuses: Mutex<VecDeque<String>>,
    surveys: Mutex<Vec<(i64, SurveySpec)>>,
    existing_survey: Option<ExistingSurvey>,
    failing_links: HashSet<i64>,
    failing_names: HashSet<String>,
    fail_writes: bool,
    fail_refresh: bool,
}

impl FakeRemote {
    pub fn failing_link(mut self, credential_id: i64) -> Self {
        self.failing_links.insert(credential_id);
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Rejects create/update calls for one template name.
    pub fn failing_name(mut self, name: &str) -> Self {
        self.failing_names.insert(name.to_string());
        self
    }

    pub fn failing_refresh(mut self) -> Self {
        self.fail_refresh = true;
        self
    }

    pub fn with_project_statuses(self, statuses: &[&str]) -> Self {
        *self.project_statuses.lock().unwrap() = statuses.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_survey(mut self, survey: ExistingSurvey) -> Self {
        self.existing_survey = Some(survey);
        self
    }

    pub fn seed_template(&self, name: &str) -> i64 {
        let mut templates = self.templates.lock().unwrap();
        let id = templates.len() as i64 + 1;
        templates.push(JobTemplate {
            id,
            name: name.to_string(),
            playbook: None,
            survey_enabled: false,
        });
        id
    }

    pub fn templates(&self) -> Vec<JobTemplate> {
        self.templates.lock().unwrap().clone()
    }

    /// Request bodies sent with create/update calls.
    pub fn bodies(&self) -> Vec<DesiredTemplate> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn links(&self) -> Vec<(i64, i64)> {
        self.links.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn surveys(&self) -> Vec<(i64, SurveySpec)> {
        self.surveys.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_write(&self, template: &DesiredTemplate) -> Result<(), ApiError> {
        if self.fail_writes || self.failing_names.contains(&template.name) {
            return Err(rejected("template rejected"));
        }
        self.bodies.lock().unwrap().push(template.clone());
        Ok(())
    }
}

#[async_trait]
impl RemoteClient for FakeRemote {
    async fn find_template(&self, name: &str) -> Result<Option<JobTemplate>, ApiError> {
        self.record(format!("find {}", name));
        Ok(self
            .templates
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn get_template(&self, id: i64) -> Result<JobTemplate, ApiError> {
        self.record(format!("get {}", id));
        self.templates
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: "Not found.".to_string(),
            })
    }

    async fn create_template(&self, template: &DesiredTemplate) -> Result<JobTemplate, ApiError> {
        self.record(format!("create {}", template.name));
        self.check_write(template)?;
        let id = self.seed_template(&template.name);
        Ok(JobTemplate {
            id,
            name: template.name.clone(),
            playbook: Some(template.playbook.clone()),
            survey_enabled: false,
        })
    }

    async fn update_template(
        &self,
        id: i64,
        template: &DesiredTemplate,
    ) -> Result<JobTemplate, ApiError> {
        self.record(format!("update {}", id));
        self.check_write(template)?;
        Ok(JobTemplate {
            id,
            name: template.name.clone(),
            playbook: Some(template.playbook.clone()),
            survey_enabled: false,
        })
    }

    async fn link_credential(&self, template_id: i64, credential_id: i64) -> Result<(), ApiError> {
        if self.failing_links.contains(&credential_id) {
            return Err(rejected("credential cannot be assigned"));
        }
        self.links.lock().unwrap().push((template_id, credential_id));
        Ok(())
    }

    async fn trigger_refresh(&self, project_id: i64) -> Result<(), ApiError> {
        self.record(format!("refresh {}", project_id));
        if self.fail_refresh {
            return Err(rejected("project update not allowed"));
        }
        Ok(())
    }

    async fn project_status(&self, project_id: i64) -> Result<Option<String>, ApiError> {
        self.record(format!("status {}", project_id));
        Ok(self.project_statuses.lock().unwrap().pop_front())
    }

    async fn get_survey(&self, template_id: i64) -> Result<ExistingSurvey, ApiError> {
        self.record(format!("get survey {}", template_id));
        self.existing_survey.clone().ok_or_else(|| ApiError::Status {
            status: 404,
            body: "Not found.".to_string(),
        })
    }

    async fn replace_survey(&self, template_id: i64, survey: &SurveySpec) -> Result<(), ApiError> {
        self.record(format!("replace survey {}", template_id));
        if self.fail_writes {
            return Err(rejected("invalid survey"));
        }
        self.surveys.lock().unwrap().push((template_id, survey.clone()));
        Ok(())
    }

    async fn enable_survey(&self, template_id: i64) -> Result<JobTemplate, ApiError> {
        self.record(format!("enable survey {}", template_id));
        let mut templates = self.templates.lock().unwrap();
        let template = templates
            .iter_mut()
            .find(|t| t.id == template_id)
            .ok_or_else(|| rejected("no such template"))?;
        template.survey_enabled = true;
        Ok(template.clone())
    }
}
