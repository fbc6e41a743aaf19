//! In-memory fakes for the platform traits.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

use crate::basket::ItemFields;
use crate::config::ReconcilerConfig;
use crate::cookie::MemoryCookieJar;
use crate::error::BasketSyncError;
use crate::reconciler::{BasketReconciler, Platform};
use crate::sync::QuickCartResponse;
use crate::traits::clock::Clock;
use crate::traits::display::HeaderDisplay;
use crate::traits::executor::TaskSpawner;
use crate::traits::page::{BasketPage, BasketRow, DeleteHandler};
use crate::traits::storage::CookieJar;
use crate::traits::transport::CartTransport;

/// 2026-10-16T00:00:00Z
pub const NOW_MS: i64 = 1_792_108_800_000;

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> Result<i64, BasketSyncError> {
        Ok(self.0)
    }
}

pub struct StaticPage {
    basket_page: bool,
    rows: Option<Vec<BasketRow>>,
    header: String,
    navigations: RefCell<Vec<String>>,
    handlers: RefCell<Vec<DeleteHandler>>,
}

impl StaticPage {
    pub fn basket(rows: Vec<BasketRow>) -> Self {
        Self {
            basket_page: true,
            rows: Some(rows),
            header: String::new(),
            navigations: RefCell::default(),
            handlers: RefCell::default(),
        }
    }

    pub fn other(header: &str) -> Self {
        Self {
            basket_page: false,
            rows: Some(Vec::new()),
            header: header.to_string(),
            navigations: RefCell::default(),
            handlers: RefCell::default(),
        }
    }

    /// A page whose rows cannot be read.
    pub fn broken() -> Self {
        Self {
            rows: None,
            ..Self::basket(Vec::new())
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn click_delete(&self, button: usize) {
        let handler = Rc::clone(&self.handlers.borrow()[button]);
        handler();
    }
}

impl BasketPage for StaticPage {
    fn is_basket_page(&self) -> Result<bool, BasketSyncError> {
        Ok(self.basket_page)
    }

    fn basket_rows(&self) -> Result<Vec<BasketRow>, BasketSyncError> {
        self.rows
            .clone()
            .ok_or_else(|| BasketSyncError::Dom("row without .item-sku".to_string()))
    }

    fn header_item_count(&self) -> Result<String, BasketSyncError> {
        Ok(self.header.clone())
    }

    fn navigate(&self, path: &str) -> Result<(), BasketSyncError> {
        self.navigations.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn attach_delete_handler(&self, handler: DeleteHandler) -> Result<usize, BasketSyncError> {
        // One delete button per rendered row.
        let buttons = self.rows.as_ref().map_or(0, Vec::len);
        let mut handlers = self.handlers.borrow_mut();
        for _ in 0..buttons {
            handlers.push(Rc::clone(&handler));
        }
        Ok(buttons)
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    item_counts: RefCell<Vec<String>>,
    totals: RefCell<Vec<String>>,
    broken: Cell<bool>,
}

impl RecordingDisplay {
    pub fn break_writes(&self) {
        self.broken.set(true);
    }

    pub fn item_count(&self) -> String {
        self.item_counts.borrow().last().cloned().unwrap_or_default()
    }

    pub fn total_value(&self) -> String {
        self.totals.borrow().last().cloned().unwrap_or_default()
    }

    pub fn item_count_writes(&self) -> usize {
        self.item_counts.borrow().len()
    }
}

impl HeaderDisplay for RecordingDisplay {
    fn set_item_count(&self, text: &str) -> Result<(), BasketSyncError> {
        if self.broken.get() {
            return Err(BasketSyncError::Dom("header element missing".to_string()));
        }
        self.item_counts.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn set_total_value(&self, text: &str) -> Result<(), BasketSyncError> {
        if self.broken.get() {
            return Err(BasketSyncError::Dom("header element missing".to_string()));
        }
        self.totals.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Answers every quick-add with `{quickCartItems: qty, quickCartValue: "<sku>-total"}`,
/// taking the quantity from the `<sku>.qty` field (blank when missing).
#[derive(Default)]
pub struct MockTransport {
    calls: RefCell<Vec<(String, ItemFields)>>,
    failing: RefCell<HashSet<String>>,
}

impl MockTransport {
    pub fn fail_for(&self, sku: &str) {
        self.failing.borrow_mut().insert(sku.to_string());
    }

    pub fn calls(&self) -> Vec<(String, ItemFields)> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl CartTransport for MockTransport {
    async fn quick_add(
        &self,
        endpoint: &str,
        fields: &ItemFields,
    ) -> Result<QuickCartResponse, BasketSyncError> {
        self.calls
            .borrow_mut()
            .push((endpoint.to_string(), fields.clone()));
        let sku = fields.sku().unwrap_or_default().to_string();
        if self.failing.borrow().contains(&sku) {
            return Err(BasketSyncError::Transport("unexpected status 500".to_string()));
        }
        let qty = fields.get(&format!("{sku}.qty")).unwrap_or_default().to_string();
        Ok(QuickCartResponse::new(qty, format!("{sku}-total")))
    }
}

/// Holds spawned tasks until the test decides to run them.
#[derive(Default)]
pub struct QueueSpawner {
    tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl QueueSpawner {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn run_all(&self) {
        let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
        for task in tasks {
            futures::executor::block_on(task);
        }
    }

    pub fn run_all_reversed(&self) {
        let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).rev().collect();
        for task in tasks {
            futures::executor::block_on(task);
        }
    }
}

impl TaskSpawner for QueueSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}

pub struct Harness {
    pub page: Rc<StaticPage>,
    pub jar: Rc<MemoryCookieJar>,
    pub display: Rc<RecordingDisplay>,
    pub transport: Rc<MockTransport>,
    pub spawner: Rc<QueueSpawner>,
}

impl Harness {
    fn with_page(page: StaticPage) -> Self {
        Self {
            page: Rc::new(page),
            jar: Rc::new(MemoryCookieJar::frozen_at(NOW_MS)),
            display: Rc::default(),
            transport: Rc::default(),
            spawner: Rc::default(),
        }
    }

    pub fn basket_page(rows: Vec<BasketRow>) -> Self {
        Self::with_page(StaticPage::basket(rows))
    }

    pub fn other_page(header: &str) -> Self {
        Self::with_page(StaticPage::other(header))
    }

    pub fn set_cookie(&self, assignment: &str) {
        self.jar.apply(assignment).unwrap();
    }

    pub fn platform(&self) -> Platform {
        Platform {
            page: self.page.clone(),
            jar: self.jar.clone(),
            display: self.display.clone(),
            transport: self.transport.clone(),
            clock: Rc::new(FixedClock(NOW_MS)),
            spawner: self.spawner.clone(),
        }
    }

    pub fn reconciler(&self) -> BasketReconciler {
        BasketReconciler::new(ReconcilerConfig::default(), self.platform())
    }
}
