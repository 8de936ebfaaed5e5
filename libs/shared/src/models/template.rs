use serde::{Deserialize, Serialize};

pub const JOB_TYPE_RUN: &str = "run";

/// Desired state of one AWX job template.
///
/// Serializes to the create/update request body. `credentials` and `hosts`
/// are never sent with it: credentials are associated one by one after the
/// template exists, and hosts come from the playbook itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DesiredTemplate {
    pub name: String,
    pub description: String,
    pub job_type: String,
    pub inventory: i64,
    pub project: i64,
    pub playbook: String,
    pub ask_variables_on_launch: bool,
    /// Extra variables as a YAML document.
    pub extra_vars: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_environment: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_limit_on_launch: Option<bool>,
    #[serde(skip)]
    pub credentials: Vec<i64>,
    #[serde(skip)]
    pub hosts: String,
}
