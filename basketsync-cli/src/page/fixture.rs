use std::cell::RefCell;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use basketsync_core::error::BasketSyncError;
use basketsync_core::traits::page::{BasketPage, BasketRow, DeleteHandler};

#[derive(Debug, Deserialize)]
struct FixtureRow {
    sku: String,
    qty: String,
}

/// JSON description of a page:
///
/// ```json
/// { "basketPage": true, "rows": [{ "sku": "A123", "qty": "2" }], "headerItems": "0" }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureFile {
    #[serde(default)]
    basket_page: bool,
    #[serde(default)]
    rows: Vec<FixtureRow>,
    #[serde(default)]
    header_items: String,
    /// Delete buttons on the page; defaults to one per row.
    delete_buttons: Option<usize>,
}

/// A page loaded from a fixture file. Navigation and click handlers are
/// recorded instead of acted on.
pub struct FixturePage {
    basket_page: bool,
    rows: Vec<BasketRow>,
    header_items: String,
    delete_buttons: usize,
    navigations: RefCell<Vec<String>>,
    handlers: RefCell<Vec<DeleteHandler>>,
}

impl FixturePage {
    pub fn load(path: &Path) -> Result<Self, BasketSyncError> {
        let text = fs::read_to_string(path).map_err(|e| {
            BasketSyncError::Dom(format!("read page fixture {} failed: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, BasketSyncError> {
        let file: FixtureFile = serde_json::from_str(text)?;
        let delete_buttons = file.delete_buttons.unwrap_or(file.rows.len());
        Ok(Self {
            basket_page: file.basket_page,
            rows: file
                .rows
                .into_iter()
                .map(|r| BasketRow::new(r.sku, r.qty))
                .collect(),
            header_items: file.header_items,
            delete_buttons,
            navigations: RefCell::default(),
            handlers: RefCell::default(),
        })
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    /// Simulate a click on delete button `index`.
    pub fn click_delete(&self, index: usize) -> Result<(), BasketSyncError> {
        let handler = self
            .handlers
            .borrow()
            .get(index)
            .cloned()
            .ok_or_else(|| BasketSyncError::Dom(format!("no armed delete button #{index}")))?;
        handler();
        Ok(())
    }
}

impl BasketPage for FixturePage {
    fn is_basket_page(&self) -> Result<bool, BasketSyncError> {
        Ok(self.basket_page)
    }

    fn basket_rows(&self) -> Result<Vec<BasketRow>, BasketSyncError> {
        Ok(self.rows.clone())
    }

    fn header_item_count(&self) -> Result<String, BasketSyncError> {
        Ok(self.header_items.clone())
    }

    fn navigate(&self, path: &str) -> Result<(), BasketSyncError> {
        info!("Navigating to {path}");
        self.navigations.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn attach_delete_handler(&self, handler: DeleteHandler) -> Result<usize, BasketSyncError> {
        let mut handlers = self.handlers.borrow_mut();
        handlers.extend(std::iter::repeat(handler).take(self.delete_buttons));
        Ok(self.delete_buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fixture_defaults() {
        let page = FixturePage::from_json("{}").unwrap();
        assert!(!page.is_basket_page().unwrap());
        assert!(page.basket_rows().unwrap().is_empty());
        assert_eq!(page.header_item_count().unwrap(), "");
    }

    #[test]
    fn test_fixture_rows_and_buttons() {
        let page = FixturePage::from_json(
            r#"{"basketPage":true,"rows":[{"sku":"A1","qty":"2"},{"sku":"B2","qty":"1"}]}"#,
        )
        .unwrap();
        assert_eq!(page.basket_rows().unwrap()[1], BasketRow::new("B2", "1"));

        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let armed = page
            .attach_delete_handler(Rc::new(move || counter.set(counter.get() + 1)))
            .unwrap();
        assert_eq!(armed, 2);

        page.click_delete(1).unwrap();
        assert_eq!(clicks.get(), 1);
        assert!(page.click_delete(2).is_err());
    }

    #[test]
    fn test_fixture_rejects_bad_json() {
        assert!(matches!(
            FixturePage::from_json(r#"{"rows":"A1"}"#),
            Err(BasketSyncError::Serialization(_))
        ));
    }
}
