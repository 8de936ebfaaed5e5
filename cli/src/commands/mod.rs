use std::path::PathBuf;

use awxsync_api::Client;
use awxsync_shared::inventory::load_applications;
use clap::Subcommand;

use crate::config::AppConfig;

pub mod survey;
pub mod templates;
#[cfg(test)]
pub mod test_support;

#[derive(Subcommand)]
pub enum Commands {
    /// Get CLI Version
    Version,

    /// Save an AWX API token (and optionally the AWX URL) to the config file
    Login {
        /// API token for authentication
        #[arg(long, env("AWX_TOKEN"))]
        token: String,
        /// AWX/Tower URL, e.g. https://awx.example.com
        #[arg(long)]
        url: Option<String>,
    },

    /// Remove the saved API token
    Logout,

    /// Create or update one job template per playbook
    Sync {
        /// Directory holding the playbooks
        #[arg(long, short, default_value = "playbooks/esphome")]
        dir: PathBuf,
        /// Do not sync the AWX project before reconciling templates
        #[arg(long, default_value_t = false)]
        skip_refresh: bool,
    },

    /// Replace a job template's survey with the current application list
    Survey {
        /// Job template to attach the survey to
        #[arg(long, short, env("TEMPLATE_ID"), default_value_t = 32)]
        template_id: i64,
        /// Inventory file listing the applications
        #[arg(
            long,
            short = 'f',
            default_value = "inventories/group_vars/all/k3s_applications.yml"
        )]
        apps_file: PathBuf,
        /// Top-level key holding the applications mapping
        #[arg(long, default_value = "k3s_applications")]
        apps_key: String,
    },
}

impl Commands {
    pub async fn run(self, config: AppConfig) -> Result<(), String> {
        match self {
            Commands::Version => {
                println!("awxsync v{}", env!("CARGO_PKG_VERSION"));
            }
            Commands::Login { token, url } => {
                let mut updated_config = config.clone();
                updated_config.token = Some(token);
                if url.is_some() {
                    updated_config.url = url;
                }

                updated_config
                    .save()
                    .map_err(|e| format!("Failed to save config: {}", e))?;
                println!("API token saved successfully!");
            }
            Commands::Logout => {
                let mut updated_config = config.clone();
                updated_config.token = None;

                updated_config
                    .save()
                    .map_err(|e| format!("Failed to save config: {}", e))?;
            }
            Commands::Sync { dir, skip_refresh } => {
                println!("AWX Job Template Sync");
                println!("{}", "=".repeat(60));

                let settings = config.sync_settings().map_err(|e| e.to_string())?;
                let client = Client::new(&settings.client).map_err(|e| e.to_string())?;
                let base = std::env::current_dir()
                    .map_err(|e| format!("Failed to read current directory: {}", e))?;

                let summary =
                    templates::sync_templates(&client, &settings, &dir, &base, skip_refresh)
                        .await?;

                println!("\n{}", summary.to_text());
                if !summary.is_success() {
                    return Err(format!(
                        "{} playbook(s) failed to reconcile",
                        summary.failed.len()
                    ));
                }
            }
            Commands::Survey {
                template_id,
                apps_file,
                apps_key,
            } => {
                println!("AWX K3s Application Survey Updater");
                println!("{}", "=".repeat(60));

                let client_config = config.client_config().map_err(|e| e.to_string())?;

                println!("\nLoading K3s applications from: {}", apps_file.display());
                let applications =
                    load_applications(&apps_file, &apps_key).map_err(|e| e.to_string())?;
                survey::print_applications(&applications);

                let client = Client::new(&client_config).map_err(|e| e.to_string())?;
                let pushed = survey::push_survey(&client, template_id, &applications).await?;

                println!("\n{}", "=".repeat(60));
                println!("Success!");
                println!(
                    "\nTemplate URL: {}/#/templates/job_template/{}/details",
                    client_config.url.trim_end_matches('/'),
                    pushed.template.id
                );
                println!("\nSurvey question added:");
                println!("  Variable: {}", awxsync_shared::survey::SURVEY_VARIABLE);
                println!(
                    "  Type: {}",
                    awxsync_shared::survey::QUESTION_TYPE_MULTIPLE_CHOICE
                );
                println!("  Choices: {} applications", pushed.survey.choices().len());
            }
        }
        Ok(())
    }
}
