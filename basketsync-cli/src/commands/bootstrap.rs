use basketsync_core::sync::QuickAddBatch;

use crate::commands::{Session, SessionOptions};

/// Run the full page-ready flow against the page fixture.
pub async fn run_bootstrap(
    options: &SessionOptions,
) -> Result<Option<QuickAddBatch>, Box<dyn std::error::Error>> {
    let session = Session::open(options)?;
    let report = session.reconciler.on_page_ready()?;

    if let Some(outcome) = &report.outcome {
        let label = match outcome.snapshot() {
            Some(s) => format!("{} items", s.len()),
            None => "no snapshot".to_string(),
        };
        println!("Basket page reconciled: {label}");
    }
    if let Some(batch) = &report.restore {
        println!("Restoring {} items from cookie to the server...", batch.dispatched());
    }
    for path in session.page.navigations() {
        println!("Redirect: {path}");
    }
    println!("Delete buttons armed: {}", report.delete_handlers);

    Ok(report.restore)
}
