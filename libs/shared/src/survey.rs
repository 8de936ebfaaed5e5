use crate::models::survey::{Applications, SurveyQuestion, SurveySpec};

pub const SURVEY_VARIABLE: &str = "app_name";
pub const QUESTION_TYPE_MULTIPLE_CHOICE: &str = "multiplechoice";

/// Builds the single-question "which application" survey.
///
/// Choices are the application names in byte order, so the same inventory
/// always yields the same survey. An empty inventory yields no choices.
pub fn build_survey_spec(applications: &Applications) -> SurveySpec {
    let mut choices: Vec<String> = applications.keys().cloned().collect();
    choices.sort();

    SurveySpec {
        name: "K3s Application Update Survey".to_string(),
        description: "Select which K3s application to update".to_string(),
        spec: vec![SurveyQuestion {
            question_name: "Application Name".to_string(),
            question_description: "Which application do you want to update?".to_string(),
            required: true,
            kind: QUESTION_TYPE_MULTIPLE_CHOICE.to_string(),
            variable: SURVEY_VARIABLE.to_string(),
            min: None,
            max: None,
            default: String::new(),
            choices,
            new_question: true,
        }],
    }
}
