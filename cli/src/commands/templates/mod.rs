use std::collections::HashMap;
use std::path::Path;

use awxsync_api::RemoteClient;
use awxsync_shared::playbook::load_playbook;
use awxsync_shared::template::build_template;

use crate::config::SyncSettings;

pub mod reconcile;
pub mod scan;
pub mod summary;

pub use reconcile::{Reconciler, RefreshOutcome};
pub use scan::{scan_playbooks, source_path_for};
pub use summary::RunSummary;

/// Reconciles one job template per playbook in `dir`.
///
/// Playbooks are processed in file name order. A playbook that cannot be read
/// or holds no play is skipped; a template that cannot be created or updated
/// is recorded as failed. Neither stops the run.
pub async fn sync_templates<C: RemoteClient + ?Sized>(
    client: &C,
    settings: &SyncSettings,
    dir: &Path,
    base: &Path,
    skip_refresh: bool,
) -> Result<RunSummary, String> {
    let playbooks = scan_playbooks(dir)?;
    let reconciler = Reconciler::new(client, &settings.refresh);

    if !skip_refresh {
        println!(
            "\nSyncing project {} to fetch latest playbooks...",
            settings.refresh.project_id
        );
        match reconciler.refresh_project().await {
            RefreshOutcome::Successful => println!("  ✓ Project sync complete"),
            RefreshOutcome::TimedOut { .. } => {
                println!("  Warning: Sync may still be running, continuing anyway...")
            }
            RefreshOutcome::TriggerFailed(e) => {
                println!("  Warning: Could not sync project: {}", e);
                println!("  Continuing anyway...");
            }
        }
    }

    println!(
        "\nFound {} playbook(s) in {}",
        playbooks.len(),
        dir.display()
    );

    let mut summary = RunSummary::default();
    // template name -> playbook that last claimed it
    let mut claimed: HashMap<String, String> = HashMap::new();

    for path in playbooks {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("\nProcessing: {}", file_name);

        let descriptor = match load_playbook(&path, source_path_for(&path, base)) {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => {
                tracing::warn!(playbook = %file_name, "no play found in playbook, skipping");
                println!("  Warning: Could not extract a play from playbook, skipping");
                summary.skipped.push(file_name);
                continue;
            }
            Err(e) => {
                tracing::warn!(playbook = %file_name, error = %e, "unreadable playbook, skipping");
                println!("  Warning: {}, skipping", e);
                summary.skipped.push(file_name);
                continue;
            }
        };

        let desired = match build_template(&descriptor, &settings.template) {
            Ok(desired) => desired,
            Err(e) => {
                println!("  ✗ Failed: {}", e);
                summary.failed.push(file_name);
                continue;
            }
        };

        let previous = claimed.insert(desired.name.clone(), descriptor.source_path.clone());
        if let Some(previous) = previous {
            tracing::warn!(
                name = %desired.name,
                previous = %previous,
                current = %descriptor.source_path,
                "two playbooks map to the same template name; the later one wins"
            );
        }

        println!("  Using playbook path: {}", desired.playbook);

        match reconciler.reconcile(&desired).await {
            Ok(outcome) => {
                println!(
                    "  ✓ Template {}: {} (ID: {})",
                    outcome.action, desired.name, outcome.template_id
                );
                for failure in &outcome.link_failures {
                    println!(
                        "  Warning: Could not associate credential {}: {}",
                        failure.credential_id, failure.error
                    );
                }
                summary.record(&desired.name, &outcome);
            }
            Err(e) => {
                tracing::debug!(playbook = %file_name, error = %e, "reconcile failed");
                println!("  ✗ Failed: {}", e);
                summary.failed.push(file_name);
            }
        }
    }

    Ok(summary)
}
