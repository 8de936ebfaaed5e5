use std::time::Duration;

use async_trait::async_trait;
use awxsync_shared::models::{DesiredTemplate, SurveySpec};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod models;
pub mod remote;

use models::*;
pub use remote::RemoteClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// AWX REST client over `/api/v2`.
pub struct Client {
    client: ReqwestClient,
    base_url: String,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// AWX root URL, e.g. `https://awx.example.com`.
    pub url: String,
    pub token: String,
    pub verify_ssl: bool,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API token: {0}")]
    InvalidToken(#[from] header::InvalidHeaderValue),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {source} (raw response: {body})")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Client {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = ReqwestClient::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/api/v2", config.url.trim_end_matches('/')),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = checked(request.send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| {
            tracing::debug!(error = %source, raw = %body, "failed to deserialize response");
            ApiError::Decode { source, body }
        })
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        checked(request.send().await?).await?;
        Ok(())
    }
}

async fn checked(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "AWX API error");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RemoteClient for Client {
    async fn find_template(&self, name: &str) -> Result<Option<JobTemplate>, ApiError> {
        let request = self
            .client
            .get(self.url("/job_templates/"))
            .query(&[("name", name)]);
        let page: Page<JobTemplate> = self.send_json(request).await?;
        Ok(page.results.into_iter().next())
    }

    async fn get_template(&self, id: i64) -> Result<JobTemplate, ApiError> {
        let request = self.client.get(self.url(&format!("/job_templates/{}/", id)));
        self.send_json(request).await
    }

    async fn create_template(&self, template: &DesiredTemplate) -> Result<JobTemplate, ApiError> {
        let request = self.client.post(self.url("/job_templates/")).json(template);
        self.send_json(request).await
    }

    async fn update_template(
        &self,
        id: i64,
        template: &DesiredTemplate,
    ) -> Result<JobTemplate, ApiError> {
        let request = self
            .client
            .patch(self.url(&format!("/job_templates/{}/", id)))
            .json(template);
        self.send_json(request).await
    }

    async fn link_credential(&self, template_id: i64, credential_id: i64) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/job_templates/{}/credentials/", template_id)))
            .json(&AssociateInput { id: credential_id });
        self.send_empty(request).await
    }

    async fn trigger_refresh(&self, project_id: i64) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/projects/{}/update/", project_id)));
        self.send_empty(request).await
    }

    async fn project_status(&self, project_id: i64) -> Result<Option<String>, ApiError> {
        let request = self
            .client
            .get(self.url(&format!("/projects/{}/", project_id)));
        let project: Project = self.send_json(request).await?;
        Ok(project.status)
    }

    async fn get_survey(&self, template_id: i64) -> Result<ExistingSurvey, ApiError> {
        let request = self
            .client
            .get(self.url(&format!("/job_templates/{}/survey_spec/", template_id)));
        self.send_json(request).await
    }

    async fn replace_survey(&self, template_id: i64, survey: &SurveySpec) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/job_templates/{}/survey_spec/", template_id)))
            .json(survey);
        self.send_empty(request).await
    }

    async fn enable_survey(&self, template_id: i64) -> Result<JobTemplate, ApiError> {
        let request = self
            .client
            .patch(self.url(&format!("/job_templates/{}/", template_id)))
            .json(&EnableSurveyInput {
                survey_enabled: true,
            });
        self.send_json(request).await
    }
}
