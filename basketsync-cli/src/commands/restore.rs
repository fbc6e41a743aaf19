use basketsync_core::sync::QuickAddBatch;

use crate::commands::{Session, SessionOptions};

/// Send the cookie's items to the server regardless of page state.
pub async fn run_restore(
    options: &SessionOptions,
) -> Result<Option<QuickAddBatch>, Box<dyn std::error::Error>> {
    let session = Session::open(options)?;
    let batch = session.reconciler.add_items_from_cookie()?;

    match &batch {
        Some(batch) => println!("Restoring {} items from cookie to the server...", batch.dispatched()),
        None => println!("No basket cookie to restore."),
    }
    Ok(batch)
}
