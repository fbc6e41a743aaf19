use std::rc::Rc;

use crate::basket::{extract_snapshot, BasketSnapshot, ItemFields};
use crate::config::ReconcilerConfig;
use crate::cookie;
use crate::error::Result;
use crate::sync::reconcile::decode_cookie_items;
use crate::sync::{add_items_to_basket, reconcile, QuickAddBatch, ReconcileOutcome};
use crate::traits::clock::Clock;
use crate::traits::display::HeaderDisplay;
use crate::traits::executor::TaskSpawner;
use crate::traits::page::BasketPage;
use crate::traits::storage::CookieJar;
use crate::traits::transport::CartTransport;

/// Everything the reconciler touches outside its own state.
#[derive(Clone)]
pub struct Platform {
    pub page: Rc<dyn BasketPage>,
    pub jar: Rc<dyn CookieJar>,
    pub display: Rc<dyn HeaderDisplay>,
    pub transport: Rc<dyn CartTransport>,
    pub clock: Rc<dyn Clock>,
    pub spawner: Rc<dyn TaskSpawner>,
}

/// Object-style entry point bundling configuration with the platform.
///
/// Each method delegates to the corresponding free function so the two
/// styles cannot drift apart.
#[derive(Clone)]
pub struct BasketReconciler {
    config: ReconcilerConfig,
    platform: Platform,
}

impl BasketReconciler {
    pub fn new(config: ReconcilerConfig, platform: Platform) -> Self {
        Self { config, platform }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Snapshot of the rows currently rendered on the page.
    pub fn snapshot(&self) -> Result<Option<BasketSnapshot>> {
        extract_snapshot(self.platform.page.as_ref())
    }

    /// Raw value of the snapshot cookie, if set.
    pub fn read_cookie(&self) -> Result<Option<String>> {
        cookie::read_cookie(self.platform.jar.as_ref(), &self.config.cookie_name)
    }

    pub fn reconcile(&self) -> Result<ReconcileOutcome> {
        reconcile(&self.platform, &self.config)
    }

    pub fn add_items(&self, items: Option<&[ItemFields]>) -> Option<QuickAddBatch> {
        add_items_to_basket(items, &self.config.server_endpoint, &self.platform)
    }

    /// Decode the snapshot cookie and send its items to the server.
    ///
    /// `None` when the cookie is missing, empty, not a JSON array, or holds
    /// no objects.
    pub fn add_items_from_cookie(&self) -> Result<Option<QuickAddBatch>> {
        let items = self
            .read_cookie()?
            .filter(|value| !value.is_empty())
            .and_then(|value| decode_cookie_items(&value));
        Ok(self.add_items(items.as_deref()))
    }

    pub fn delete_cookie(&self) -> Result<()> {
        cookie::delete_cookie(self.platform.jar.as_ref(), &self.config.cookie_name)
    }
}
