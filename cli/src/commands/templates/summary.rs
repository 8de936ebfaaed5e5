use super::reconcile::{Action, ReconcileOutcome};

/// Per-run tally of what happened to each playbook.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    /// Playbook file names whose template could not be reconciled.
    pub failed: Vec<String>,
    /// Playbook file names that held no usable play.
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn record(&mut self, name: &str, outcome: &ReconcileOutcome) {
        match outcome.action {
            Action::Created => self.created.push(name.to_string()),
            Action::Updated => self.updated.push(name.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "=".repeat(60)));
        output.push_str("Summary:\n");
        output.push_str(&format!("  Created: {}\n", self.created.len()));
        output.push_str(&format!("  Updated: {}\n", self.updated.len()));
        output.push_str(&format!("  Failed:  {}\n", self.failed.len()));
        if !self.skipped.is_empty() {
            output.push_str(&format!("  Skipped: {}\n", self.skipped.len()));
        }

        if !self.failed.is_empty() {
            output.push_str("\nFailed playbooks:\n");
            for name in &self.failed {
                output.push_str(&format!("  - {}\n", name));
            }
        }
        output
    }
}
