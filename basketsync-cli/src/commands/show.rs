use basketsync_core::basket::parse_item_list;

use crate::commands::{Session, SessionOptions};

/// Show the stored cookie and the page fixture's basket.
pub async fn run_show(options: &SessionOptions) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(options)?;
    let config = session.reconciler.config();

    println!("basketsync status");
    println!("=================");
    println!("  Cookie name: {}", config.cookie_name);
    println!("  Endpoint:    {}", config.server_endpoint);
    println!("  Jar:         {}", session.jar_path().display());

    println!();
    match session.reconciler.read_cookie()? {
        Some(value) if !value.is_empty() => {
            println!("Cookie: {value}");
            match parse_item_list(&value) {
                Ok(items) => {
                    for fields in &items {
                        let line: Vec<String> =
                            fields.pairs().iter().map(|(k, v)| format!("{k}={v}")).collect();
                        println!("  - {}", line.join(", "));
                    }
                }
                Err(e) => println!("  (undecodable: {e})"),
            }
        }
        _ => println!("Cookie: (none)"),
    }

    println!();
    match session.reconciler.snapshot()? {
        Some(snapshot) => {
            println!("Page basket: {} items", snapshot.len());
            let in_sync = match session.reconciler.read_cookie()? {
                Some(value) => snapshot.matches_serialized(&value)?,
                None => false,
            };
            println!("  Status: {}", if in_sync { "IN SYNC" } else { "OUT OF SYNC" });
        }
        None => println!("Page basket: (empty)"),
    }

    Ok(())
}
