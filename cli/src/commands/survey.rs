use awxsync_api::RemoteClient;
use awxsync_api::models::JobTemplate;
use awxsync_shared::models::{Applications, SurveySpec};
use awxsync_shared::survey::build_survey_spec;

/// Result of pushing the application survey onto a template.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyPushed {
    pub template: JobTemplate,
    pub survey: SurveySpec,
    /// Question count of the survey that was replaced, if there was one.
    pub replaced_questions: Option<usize>,
}

/// Replaces the template's survey with one application choice per inventory
/// entry, then enables it.
pub async fn push_survey<C: RemoteClient + ?Sized>(
    client: &C,
    template_id: i64,
    applications: &Applications,
) -> Result<SurveyPushed, String> {
    println!("\nFetching job template {}...", template_id);
    let template = client
        .get_template(template_id)
        .await
        .map_err(|e| format!("Could not find template with ID {}: {}", template_id, e))?;
    println!("Template name: {}", template.name);
    println!(
        "Template playbook: {}",
        template.playbook.as_deref().unwrap_or("N/A")
    );

    // A template without a survey answers with an error or an empty spec.
    let replaced_questions = match client.get_survey(template_id).await {
        Ok(existing) if !existing.spec.is_empty() => {
            println!(
                "\nCurrent survey exists with {} question(s)",
                existing.spec.len()
            );
            Some(existing.spec.len())
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(template_id, error = %e, "no current survey");
            None
        }
    };

    println!("\nBuilding survey specification...");
    let survey = build_survey_spec(applications);
    if survey.choices().is_empty() {
        tracing::warn!(template_id, "survey has no application choices");
    }

    println!(
        "Updating survey with {} application choices...",
        survey.choices().len()
    );
    client
        .replace_survey(template_id, &survey)
        .await
        .map_err(|e| format!("Failed to update survey: {}", e))?;
    println!("✓ Survey updated successfully");

    println!("Enabling survey on template...");
    let template = client
        .enable_survey(template_id)
        .await
        .map_err(|e| format!("Failed to enable survey: {}", e))?;
    println!("✓ Survey enabled");

    Ok(SurveyPushed {
        template,
        survey,
        replaced_questions,
    })
}

pub fn print_applications(applications: &Applications) {
    println!("Found {} applications:", applications.len());
    let mut names: Vec<&String> = applications.keys().collect();
    names.sort();
    for name in names {
        println!(
            "  - {} ({})",
            name,
            applications[name.as_str()].deployment_method()
        );
    }
}
