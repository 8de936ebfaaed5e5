//! Application inventory loading.

use std::path::Path;

use serde_yaml::Value;

use crate::error::InventoryError;
use crate::models::survey::{ApplicationEntry, Applications};
use crate::models::value::scalar_text;

/// Loads the applications mapping stored under `key` in an inventory file.
///
/// A file without `key` yields no applications. Entries whose settings are
/// not a mapping are kept with default settings.
pub fn load_applications(path: &Path, key: &str) -> Result<Applications, InventoryError> {
    if !path.exists() {
        return Err(InventoryError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| InventoryError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_applications(&content, key)
}

pub fn parse_applications(content: &str, key: &str) -> Result<Applications, InventoryError> {
    let document: Value = serde_yaml::from_str(content)?;

    let applications = match document.get(key) {
        None | Some(Value::Null) => {
            tracing::warn!(key, "inventory has no applications");
            return Ok(Applications::new());
        }
        Some(Value::Mapping(applications)) => applications,
        Some(_) => {
            return Err(InventoryError::InvalidApplications {
                key: key.to_string(),
            });
        }
    };

    Ok(applications
        .iter()
        .filter_map(|(name, settings)| {
            let name = scalar_text(name)?;
            let entry = match settings {
                Value::Mapping(fields) => ApplicationEntry {
                    deployment_method: deployment_method(&name, fields.get("deployment_method")),
                },
                _ => ApplicationEntry::default(),
            };
            Some((name, entry))
        })
        .collect())
}

fn deployment_method(application: &str, value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(value) => {
            let method = scalar_text(value);
            if method.is_none() {
                tracing::warn!(application, "deployment_method is not a scalar, ignoring it");
            }
            method
        }
    }
}
