//! Playbook parsing.
//!
//! A playbook is a YAML sequence of plays. Only the first play is read; AWX
//! runs one playbook per job template and the remaining plays carry nothing
//! the template needs.

use std::path::Path;

use serde_yaml::Value;

use crate::error::PlaybookError;
use crate::models::playbook::{DEFAULT_TARGET_SCOPE, TaskDescriptor};
use crate::models::value::{Variables, scalar_text, variables_from_mapping};

/// Extracts a descriptor from playbook text.
///
/// Returns `None` when the text is not YAML, is empty, or its first element
/// is not a mapping.
pub fn parse_playbook(content: &str, source_path: impl Into<String>) -> Option<TaskDescriptor> {
    let document: Value = match serde_yaml::from_str(content) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!(error = %e, "playbook is not valid YAML");
            return None;
        }
    };

    let Value::Sequence(plays) = document else {
        return None;
    };
    let Some(Value::Mapping(play)) = plays.into_iter().next() else {
        return None;
    };

    let display_name = play.get("name").and_then(scalar_text).unwrap_or_default();

    let target_scope = match play.get("hosts") {
        Some(Value::Sequence(hosts)) if !hosts.is_empty() => hosts
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(","),
        Some(hosts) => scalar_text(hosts).unwrap_or_else(|| DEFAULT_TARGET_SCOPE.to_string()),
        None => DEFAULT_TARGET_SCOPE.to_string(),
    };

    let variables = match play.get("vars") {
        Some(Value::Mapping(vars)) => variables_from_mapping(vars.clone()),
        _ => Variables::new(),
    };

    Some(TaskDescriptor {
        display_name,
        target_scope,
        variables,
        source_path: source_path.into(),
    })
}

/// Reads and parses a playbook file.
///
/// `Ok(None)` means the file was read but holds no usable play.
pub fn load_playbook(
    path: &Path,
    source_path: impl Into<String>,
) -> Result<Option<TaskDescriptor>, PlaybookError> {
    let content = std::fs::read_to_string(path).map_err(|e| PlaybookError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_playbook(&content, source_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::value::VarValue;

    const FLASH_ALL: &str = r#"
- name: Flash all ESPHome devices
  hosts: localhost
  gather_facts: false
  vars:
    k3s_context: homelab
    esphome_timeout: 30
    device_patterns:
      - "kitchen-*"
      - "garage-*"
  tasks:
    - name: noop
      debug:
        msg: hi
- name: Second play
  hosts: all
"#;

    #[test]
    fn test_parse_first_play() {
        let descriptor = parse_playbook(FLASH_ALL, "playbooks/esphome/flash_all.yaml").unwrap();

        assert_eq!(descriptor.display_name, "Flash all ESPHome devices");
        assert_eq!(descriptor.target_scope, "localhost");
        assert_eq!(descriptor.source_path, "playbooks/esphome/flash_all.yaml");
        assert_eq!(
            descriptor.variables.get("esphome_timeout"),
            Some(&VarValue::Integer(30))
        );
        assert_eq!(descriptor.variables.len(), 3);
    }

    #[test]
    fn test_defaults_when_keys_missing() {
        let descriptor = parse_playbook("- tasks: []\n", "x.yaml").unwrap();

        assert_eq!(descriptor.display_name, "");
        assert_eq!(descriptor.target_scope, DEFAULT_TARGET_SCOPE);
        assert!(descriptor.variables.is_empty());
    }

    #[test]
    fn test_hosts_list_is_joined() {
        let descriptor = parse_playbook("- hosts: [web, db]\n", "x.yaml").unwrap();
        assert_eq!(descriptor.target_scope, "web,db");
    }

    #[test]
    fn test_vars_not_a_mapping() {
        let descriptor = parse_playbook("- name: x\n  vars: [1, 2]\n", "x.yaml").unwrap();
        assert!(descriptor.variables.is_empty());
    }

    #[test]
    fn test_rejects_non_playbooks() {
        assert!(parse_playbook("", "x.yaml").is_none());
        assert!(parse_playbook("name: not a list\n", "x.yaml").is_none());
        assert!(parse_playbook("[]\n", "x.yaml").is_none());
        assert!(parse_playbook("- just a string\n", "x.yaml").is_none());
        assert!(parse_playbook("- name: [unclosed\n", "x.yaml").is_none());
    }

    #[test]
    fn test_load_playbook_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flash_all.yaml");
        std::fs::write(&path, FLASH_ALL).unwrap();

        let descriptor = load_playbook(&path, "flash_all.yaml").unwrap().unwrap();
        assert_eq!(descriptor.display_name, "Flash all ESPHome devices");
    }

    #[test]
    fn test_load_playbook_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_playbook(&dir.path().join("nope.yaml"), "nope.yaml").unwrap_err();
        assert!(matches!(err, PlaybookError::Read { .. }));
    }
}
