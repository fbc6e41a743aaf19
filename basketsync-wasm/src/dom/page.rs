use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, Window};

use basketsync_core::constants::{
    BASKET_PAGE_CLASS, BASKET_ROW_SELECTOR, DELETE_BUTTON_SELECTOR, HEADER_ITEMS_SELECTOR,
    ITEM_QTY_SELECTOR, ITEM_SKU_SELECTOR,
};
use basketsync_core::error::BasketSyncError;
use basketsync_core::traits::page::{BasketPage, BasketRow, DeleteHandler};

use crate::dom::require_element;

/// The rendered storefront page.
pub struct DomBasketPage {
    window: Window,
    document: Document,
}

impl DomBasketPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn select_all(&self, selector: &str) -> Result<Vec<Element>, BasketSyncError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| BasketSyncError::Dom(format!("invalid selector {selector}: {:?}", e)))?;

        let mut elements = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                elements.push(element);
            }
        }
        Ok(elements)
    }

    fn read_row(row: &Element) -> Result<BasketRow, BasketSyncError> {
        let sku = row
            .query_selector(ITEM_SKU_SELECTOR)
            .map_err(|e| BasketSyncError::Dom(format!("invalid selector: {:?}", e)))?
            .ok_or_else(|| BasketSyncError::Dom(format!("basket row without {ITEM_SKU_SELECTOR}")))?
            .text_content()
            .unwrap_or_default();

        let qty = row
            .query_selector(ITEM_QTY_SELECTOR)
            .map_err(|e| BasketSyncError::Dom(format!("invalid selector: {:?}", e)))?
            .ok_or_else(|| BasketSyncError::Dom(format!("basket row without {ITEM_QTY_SELECTOR}")))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| BasketSyncError::Dom(format!("{ITEM_QTY_SELECTOR} is not an input")))?
            .value();

        Ok(BasketRow { sku, qty })
    }
}

impl BasketPage for DomBasketPage {
    fn is_basket_page(&self) -> Result<bool, BasketSyncError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| BasketSyncError::Dom("document has no body".to_string()))?;
        Ok(body.class_list().contains(BASKET_PAGE_CLASS))
    }

    fn basket_rows(&self) -> Result<Vec<BasketRow>, BasketSyncError> {
        self.select_all(BASKET_ROW_SELECTOR)?
            .iter()
            .map(Self::read_row)
            .collect()
    }

    fn header_item_count(&self) -> Result<String, BasketSyncError> {
        Ok(require_element(&self.document, HEADER_ITEMS_SELECTOR)?
            .text_content()
            .unwrap_or_default())
    }

    fn navigate(&self, path: &str) -> Result<(), BasketSyncError> {
        self.window
            .location()
            .set_pathname(path)
            .map_err(|e| BasketSyncError::Platform(format!("navigation to {path} failed: {:?}", e)))
    }

    fn attach_delete_handler(&self, handler: DeleteHandler) -> Result<usize, BasketSyncError> {
        let buttons = self.select_all(DELETE_BUTTON_SELECTOR)?;

        for button in &buttons {
            let handler = handler.clone();
            let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                event.stop_propagation();
                handler();
            });
            button
                .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
                .map_err(|e| BasketSyncError::Dom(format!("addEventListener failed: {:?}", e)))?;
            // Listeners live as long as the page.
            on_click.forget();
        }

        Ok(buttons.len())
    }
}
