use tracing::info;

use basketsync_core::sync::{QuickAddBatch, ReconcileOutcome};

use crate::commands::{Session, SessionOptions};

/// Reconcile the page fixture's basket with the stored cookie.
pub async fn run_reconcile(
    options: &SessionOptions,
) -> Result<Option<QuickAddBatch>, Box<dyn std::error::Error>> {
    let session = Session::open(options)?;
    let outcome = session.reconciler.reconcile()?;

    match &outcome {
        ReconcileOutcome::Restored { batch: Some(batch) } => {
            println!("Restoring {} items from cookie to the server...", batch.dispatched());
        }
        ReconcileOutcome::Restored { batch: None } => {
            println!("Cookie present but holds no usable items; nothing restored.");
        }
        ReconcileOutcome::Unchanged(s) => println!("Cookie already matches basket ({} items).", s.len()),
        ReconcileOutcome::Refreshed(s) => println!("Cookie updated from basket ({} items).", s.len()),
        ReconcileOutcome::Persisted(s) => println!("Cookie created from basket ({} items).", s.len()),
        ReconcileOutcome::Cleared => println!("No basket and no cookie; cookie cleared."),
    }

    if let Some(snapshot) = outcome.snapshot() {
        println!("  Snapshot: {}", snapshot.to_json()?);
    }
    info!("Cookie jar: {}", session.jar_path().display());

    Ok(match outcome {
        ReconcileOutcome::Restored { batch } => batch,
        _ => None,
    })
}
