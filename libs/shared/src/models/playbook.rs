use super::value::Variables;

/// Hosts targeted by a play that does not declare `hosts`.
pub const DEFAULT_TARGET_SCOPE: &str = "localhost";

/// Metadata extracted from the first play of a playbook.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDescriptor {
    /// The play's `name`, empty when the play has none.
    pub display_name: String,
    pub target_scope: String,
    pub variables: Variables,
    /// Playbook path as the project sees it, e.g. `playbooks/esphome/flash_all.yaml`.
    pub source_path: String,
}
