mod commands;
mod page;
mod platform;
mod storage;
mod transport;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

use basketsync_core::sync::QuickAddBatch;
use basketsync_core::constants::QUICK_ADD_ENDPOINT;
use basketsync_core::ReconcilerConfig;

use crate::commands::SessionOptions;

#[derive(Parser)]
#[command(name = "basketsync", about = "Reconcile a rendered basket with its snapshot cookie")]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SessionArgs {
    /// Page fixture (JSON) describing the rendered page
    #[arg(long, global = true)]
    page: Option<PathBuf>,

    /// Cookie jar file
    #[arg(long, global = true, default_value = ".basketsync/cookies.json")]
    jar: PathBuf,

    /// Storefront origin that endpoint paths resolve against
    #[arg(long, global = true, env = "BASKETSYNC_ORIGIN", default_value = "http://localhost:8080")]
    origin: String,

    /// Cookie name (overrides BASKETSYNC_COOKIE_NAME)
    #[arg(long, global = true)]
    cookie_name: Option<String>,

    /// Endpoint path for per-item POSTs (overrides BASKETSYNC_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Post items to the storefront's dedicated quick-add endpoint
    #[arg(long, global = true, conflicts_with = "endpoint")]
    quick_add: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the page basket with the cookie
    Reconcile,

    /// Run the full page-ready flow (reconcile or restore, then arm delete buttons)
    Bootstrap,

    /// Send the cookie's items to the server
    Restore,

    /// Show the cookie and page basket
    Show,

    /// Delete the basket cookie
    Clear,

    /// Bootstrap, then click a delete button
    DeleteClick {
        /// Zero-based index of the delete button
        #[arg(default_value_t = 0)]
        button: usize,
    },
}

impl SessionArgs {
    fn into_options(self) -> SessionOptions {
        let mut config = ReconcilerConfig::from_env();
        if let Some(name) = self.cookie_name {
            config = config.with_cookie_name(name);
        }
        if let Some(endpoint) = self.endpoint {
            config = config.with_server_endpoint(endpoint);
        }
        if self.quick_add {
            config = config.with_server_endpoint(QUICK_ADD_ENDPOINT);
        }
        SessionOptions {
            page: self.page,
            jar: self.jar,
            origin: self.origin,
            config,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing (controlled by RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options = cli.session.into_options();

    // Quick-add requests are detached tasks on this set.
    let local = LocalSet::new();
    let result = local.run_until(run(cli.command, &options)).await;
    local.await;

    match result {
        Ok(Some(batch)) => report_batch(&batch),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(
    command: Commands,
    options: &SessionOptions,
) -> Result<Option<QuickAddBatch>, Box<dyn std::error::Error>> {
    match command {
        Commands::Reconcile => commands::reconcile::run_reconcile(options).await,
        Commands::Bootstrap => commands::bootstrap::run_bootstrap(options).await,
        Commands::Restore => commands::restore::run_restore(options).await,
        Commands::Show => commands::show::run_show(options).await.map(|()| None),
        Commands::Clear => commands::clear::run_clear(options).await.map(|()| None),
        Commands::DeleteClick { button } => {
            commands::delete_click::run_delete_click(options, button).await
        }
    }
}

fn report_batch(batch: &QuickAddBatch) {
    println!();
    println!("Quick add complete:");
    println!("  Sent:      {}", batch.dispatched());
    println!("  Succeeded: {}", batch.completed());
    if let Some(last) = batch.results().last() {
        println!("  Header:    {} items, {}", last.items_text(), last.value_text());
    }
}
