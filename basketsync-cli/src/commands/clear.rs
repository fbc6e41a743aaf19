use crate::commands::{Session, SessionOptions};

/// Delete the basket cookie.
pub async fn run_clear(options: &SessionOptions) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(options)?;
    session.reconciler.delete_cookie()?;
    println!("Cookie {} cleared.", session.reconciler.config().cookie_name);
    Ok(())
}
