//! Maps playbook descriptors onto AWX job templates.

use std::path::Path;

use crate::error::TemplateError;
use crate::models::playbook::TaskDescriptor;
use crate::models::template::{DesiredTemplate, JOB_TYPE_RUN};
use crate::models::value::Variables;
use crate::projection::{build_description, project_variables};

/// Path fragments marking playbooks that run against a single, fixed host.
/// Templates for these never prompt for a limit at launch.
const FIXED_HOST_MARKERS: [&str; 2] = ["target_device", "all"];

/// Identifiers every generated template points at.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSettings {
    pub project_id: i64,
    pub inventory_id: i64,
    pub credential_id: Option<i64>,
    pub execution_environment_id: Option<i64>,
}

pub fn build_template(
    descriptor: &TaskDescriptor,
    settings: &TemplateSettings,
) -> Result<DesiredTemplate, TemplateError> {
    let name = if descriptor.display_name.is_empty() {
        derive_template_name(&descriptor.source_path)
    } else {
        descriptor.display_name.clone()
    };

    let description = build_description(&name, &descriptor.variables);
    let extra_vars = serialize_extra_vars(&project_variables(&descriptor.variables))?;

    let ask_limit_on_launch = FIXED_HOST_MARKERS
        .iter()
        .any(|marker| descriptor.source_path.contains(marker))
        .then_some(false);

    Ok(DesiredTemplate {
        name,
        description,
        job_type: JOB_TYPE_RUN.to_string(),
        inventory: settings.inventory_id,
        project: settings.project_id,
        playbook: descriptor.source_path.clone(),
        ask_variables_on_launch: true,
        extra_vars,
        execution_environment: settings.execution_environment_id,
        ask_limit_on_launch,
        credentials: settings.credential_id.into_iter().collect(),
        hosts: descriptor.target_scope.clone(),
    })
}

/// Template name for a play without one: the file stem with underscores
/// turned into spaces, title-cased. `flash_all.yaml` becomes `Flash All`.
pub fn derive_template_name(source_path: &str) -> String {
    let stem = Path::new(source_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_path.to_string());
    title_case(&stem.replace('_', " "))
}

/// Upper-cases the first letter of every word and lower-cases the rest,
/// where a word starts after any non-alphabetic character.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;
    for ch in text.chars() {
        if prev_is_alpha {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_is_alpha = ch.is_alphabetic();
    }
    out
}

/// Renders extra variables as the YAML document AWX stores in `extra_vars`.
pub fn serialize_extra_vars(variables: &Variables) -> Result<String, TemplateError> {
    Ok(serde_yaml::to_string(variables)?)
}
