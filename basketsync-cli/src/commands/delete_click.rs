use basketsync_core::sync::QuickAddBatch;

use crate::commands::{Session, SessionOptions};

/// Bootstrap the page fixture, then click delete button `button`.
pub async fn run_delete_click(
    options: &SessionOptions,
    button: usize,
) -> Result<Option<QuickAddBatch>, Box<dyn std::error::Error>> {
    let session = Session::open(options)?;
    let report = session.reconciler.on_page_ready()?;

    session.page.click_delete(button)?;

    let still_set = session
        .reconciler
        .read_cookie()?
        .is_some_and(|value| !value.is_empty());
    println!(
        "Clicked delete #{button} of {}; cookie {}",
        report.delete_handlers,
        if still_set { "kept" } else { "cleared" }
    );
    Ok(report.restore)
}
