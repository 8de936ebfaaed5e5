use serde::{Deserialize, Serialize};

/// Project update status that ends a refresh wait.
pub const PROJECT_STATUS_SUCCESSFUL: &str = "successful";

/// One page of an AWX list endpoint.
#[derive(Deserialize, Serialize, Debug)]
pub struct Page<T> {
    pub results: Vec<T>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct JobTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub playbook: Option<String>,
    #[serde(default)]
    pub survey_enabled: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub status: Option<String>,
}

/// A survey as AWX returns it. Questions are kept loose since AWX adds
/// fields of its own.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ExistingSurvey {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spec: Vec<serde_json::Value>,
}

#[derive(Serialize, Debug)]
pub(crate) struct AssociateInput {
    pub id: i64,
}

#[derive(Serialize, Debug)]
pub(crate) struct EnableSurveyInput {
    pub survey_enabled: bool,
}
