//! CLI command implementations (reconcile, bootstrap, restore, show, clear, delete-click).

pub mod reconcile;
pub mod bootstrap;
pub mod restore;
pub mod show;
pub mod clear;
pub mod delete_click;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use basketsync_core::error::BasketSyncError;
use basketsync_core::{BasketReconciler, Platform, ReconcilerConfig};

use crate::page::{FixturePage, TerminalHeader};
use crate::platform::{NativeClock, TokioSpawner};
use crate::storage::FileCookieJar;
use crate::transport::HttpTransport;

/// Where a command reads its page and cookies from.
pub struct SessionOptions {
    pub page: Option<PathBuf>,
    pub jar: PathBuf,
    pub origin: String,
    pub config: ReconcilerConfig,
}

/// A reconciler wired to native collaborators, with typed handles kept for
/// reporting.
pub struct Session {
    pub reconciler: BasketReconciler,
    pub page: Rc<FixturePage>,
    pub jar: Rc<FileCookieJar>,
}

impl Session {
    pub fn open(options: &SessionOptions) -> Result<Self, BasketSyncError> {
        let page = match &options.page {
            Some(path) => FixturePage::load(path)?,
            // No page given: an empty, non-basket page.
            None => FixturePage::from_json("{}")?,
        };
        let page = Rc::new(page);
        let jar = Rc::new(FileCookieJar::open(&options.jar)?);

        let platform = Platform {
            page: page.clone(),
            jar: jar.clone(),
            display: Rc::new(TerminalHeader),
            transport: Rc::new(HttpTransport::new(&options.origin)?),
            clock: Rc::new(NativeClock::new()),
            spawner: Rc::new(TokioSpawner),
        };

        Ok(Self {
            reconciler: BasketReconciler::new(options.config.clone(), platform),
            page,
            jar,
        })
    }

    pub fn jar_path(&self) -> &Path {
        self.jar.path()
    }
}
