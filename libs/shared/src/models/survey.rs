use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Applications keyed by name, as declared in the inventory.
pub type Applications = IndexMap<String, ApplicationEntry>;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ApplicationEntry {
    #[serde(default)]
    pub deployment_method: Option<String>,
}

impl ApplicationEntry {
    pub fn deployment_method(&self) -> &str {
        self.deployment_method.as_deref().unwrap_or("unknown")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SurveySpec {
    pub name: String,
    pub description: String,
    pub spec: Vec<SurveyQuestion>,
}

impl SurveySpec {
    /// Choices offered by the first question.
    pub fn choices(&self) -> &[String] {
        self.spec
            .first()
            .map(|question| question.choices.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SurveyQuestion {
    pub question_name: String,
    pub question_description: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub variable: String,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub default: String,
    pub choices: Vec<String>,
    pub new_question: bool,
}
