use std::fs::{create_dir_all, write};
use std::path::Path;
use std::time::Duration;

use awxsync_api::ClientConfig;
use awxsync_shared::template::TemplateSettings;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::templates::reconcile::RefreshPolicy;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub project_id: Option<i64>,
    pub inventory_id: Option<i64>,
    pub credential_id: Option<i64>,
    pub execution_environment_id: Option<i64>,
    pub verify_ssl: bool,
    pub refresh_attempts: u32,
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Everything a template sync run needs, validated up front.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub client: ClientConfig,
    pub template: TemplateSettings,
    pub refresh: RefreshPolicy,
}

fn get_config_path() -> String {
    format!(
        "{}/.awxsync/config.toml",
        std::env::var("HOME").unwrap_or_default()
    )
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path: String = get_config_path();
        Self::load_from(&config_path, environment())
    }

    /// Defaults, then the file at `config_path`, then `env`; later layers win.
    fn load_from(config_path: &str, env: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("verify_ssl", true)?
            .set_default("refresh_attempts", 10_i64)?
            .set_default("refresh_interval_secs", 2_i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }

    pub fn save(&self) -> Result<(), String> {
        let config_path: String = get_config_path();

        if let Some(parent) = Path::new(&config_path).parent() {
            create_dir_all(parent).map_err(|e| format!("{}", e))?;
        }
        let config_str = toml::to_string_pretty(self).map_err(|e| format!("{}", e))?;
        write(config_path, config_str).map_err(|e| format!("{}", e))?;

        Ok(())
    }

    pub fn client_config(&self) -> Result<ClientConfig, SettingsError> {
        let mut missing = Vec::new();
        let url = present(&self.url, "AWX_URL", &mut missing);
        let token = present(&self.token, "AWX_TOKEN", &mut missing);
        match (url, token) {
            (Some(url), Some(token)) => Ok(ClientConfig {
                url,
                token,
                verify_ssl: self.verify_ssl,
            }),
            _ => Err(SettingsError::Missing(missing)),
        }
    }

    pub fn sync_settings(&self) -> Result<SyncSettings, SettingsError> {
        let client = self.client_config();
        let mut missing = match &client {
            Ok(_) => Vec::new(),
            Err(SettingsError::Missing(keys)) => keys.clone(),
        };
        if self.project_id.is_none() {
            missing.push("AWX_PROJECT_ID");
        }
        if self.inventory_id.is_none() {
            missing.push("AWX_INVENTORY_ID");
        }

        match (client, self.project_id, self.inventory_id) {
            (Ok(client), Some(project_id), Some(inventory_id)) => Ok(SyncSettings {
                client,
                template: TemplateSettings {
                    project_id,
                    inventory_id,
                    credential_id: self.credential_id,
                    execution_environment_id: self.execution_environment_id,
                },
                refresh: RefreshPolicy {
                    project_id,
                    attempts: self.refresh_attempts,
                    interval: Duration::from_secs(self.refresh_interval_secs),
                },
            }),
            _ => Err(SettingsError::Missing(missing)),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("AWX").ignore_empty(true)
}

fn present(
    value: &Option<String>,
    key: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            missing.push(key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> AppConfig {
        AppConfig {
            url: None,
            token: None,
            project_id: None,
            inventory_id: None,
            credential_id: None,
            execution_environment_id: None,
            verify_ssl: true,
            refresh_attempts: 10,
            refresh_interval_secs: 2,
        }
    }

    fn env_vars(vars: &[(&str, &str)]) -> Environment {
        environment().source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_load_env_overrides_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "url = \"https://file.example.com\"\nproject_id = 1\ninventory_id = 2\nrefresh_attempts = 4\n",
        )
        .unwrap();

        let config = AppConfig::load_from(
            path.to_str().unwrap(),
            env_vars(&[
                ("AWX_URL", "https://env.example.com"),
                ("AWX_PROJECT_ID", "8"),
                ("AWX_VERIFY_SSL", "false"),
                ("AWX_TOKEN", ""),
            ]),
        )
        .unwrap();

        assert_eq!(config.url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.project_id, Some(8));
        assert!(!config.verify_ssl);
        assert_eq!(config.inventory_id, Some(2));
        assert_eq!(config.refresh_attempts, 4);
        assert_eq!(config.refresh_interval_secs, 2);
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let config = AppConfig::load_from(path.to_str().unwrap(), env_vars(&[])).unwrap();

        assert_eq!(config, empty());
    }

    #[test]
    fn test_sync_settings_lists_every_missing_key() {
        let err = empty().sync_settings().unwrap_err();
        assert_eq!(
            err,
            SettingsError::Missing(vec![
                "AWX_URL",
                "AWX_TOKEN",
                "AWX_PROJECT_ID",
                "AWX_INVENTORY_ID"
            ])
        );
        assert_eq!(
            err.to_string(),
            "Missing required configuration: AWX_URL, AWX_TOKEN, AWX_PROJECT_ID, AWX_INVENTORY_ID"
        );
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = AppConfig {
            url: Some("  ".into()),
            token: Some("t".into()),
            ..empty()
        };
        assert_eq!(
            config.client_config().unwrap_err(),
            SettingsError::Missing(vec!["AWX_URL"])
        );
    }

    #[test]
    fn test_sync_settings() {
        let config = AppConfig {
            url: Some("https://awx.example.com".into()),
            token: Some("t".into()),
            project_id: Some(8),
            inventory_id: Some(2),
            credential_id: Some(5),
            verify_ssl: false,
            refresh_attempts: 3,
            ..empty()
        };

        let settings = config.sync_settings().unwrap();
        assert_eq!(settings.client.url, "https://awx.example.com");
        assert!(!settings.client.verify_ssl);
        assert_eq!(settings.template.project_id, 8);
        assert_eq!(settings.template.inventory_id, 2);
        assert_eq!(settings.template.credential_id, Some(5));
        assert_eq!(settings.template.execution_environment_id, None);
        assert_eq!(settings.refresh.project_id, 8);
        assert_eq!(settings.refresh.attempts, 3);
        assert_eq!(settings.refresh.interval, Duration::from_secs(2));
    }
}
