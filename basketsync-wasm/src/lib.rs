pub mod dom;
pub mod platform;
pub mod storage;
pub mod transport;

use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Event;

use basketsync_core::basket::{parse_item_list, BasketSnapshot};
use basketsync_core::bootstrap::BootstrapReport;
use basketsync_core::constants::VERSION;
use basketsync_core::error::BasketSyncError;
use basketsync_core::{BasketReconciler, Platform, ReconcilerConfig};

use crate::dom::{DomBasketPage, DomHeaderDisplay};
use crate::platform::logging::{self, console_log};
use crate::platform::{WasmClock, WasmSpawner};
use crate::storage::DocumentCookieJar;
use crate::transport::FetchTransport;

fn to_js(err: BasketSyncError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Wire every platform trait to the live browser objects.
fn browser_platform() -> Result<Platform, BasketSyncError> {
    let window = web_sys::window()
        .ok_or_else(|| BasketSyncError::Platform("No global `window` object found".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| BasketSyncError::Platform("window has no document".to_string()))?;

    Ok(Platform {
        jar: Rc::new(DocumentCookieJar::new(&document)?),
        display: Rc::new(DomHeaderDisplay::new(document.clone())),
        page: Rc::new(DomBasketPage::new(window, document)),
        transport: Rc::new(FetchTransport::new()),
        clock: Rc::new(WasmClock::new()),
        spawner: Rc::new(WasmSpawner),
    })
}

/// Read an optional string property from a JS options object.
fn string_option(options: &JsValue, key: &str) -> Result<Option<String>, JsValue> {
    let value = Reflect::get(options, &JsValue::from_str(key))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .as_string()
        .map(Some)
        .ok_or_else(|| JsValue::from_str(&format!("option `{key}` must be a string")))
}

/// `{ productCookie?, serverEndpoint?, basketPagePath? }`; missing fields keep defaults.
fn read_options(options: &JsValue) -> Result<ReconcilerConfig, JsValue> {
    let mut config = ReconcilerConfig::default();
    if options.is_undefined() || options.is_null() {
        return Ok(config);
    }
    if let Some(name) = string_option(options, "productCookie")? {
        config = config.with_cookie_name(name);
    }
    if let Some(endpoint) = string_option(options, "serverEndpoint")? {
        config = config.with_server_endpoint(endpoint);
    }
    if let Some(path) = string_option(options, "basketPagePath")? {
        config = config.with_basket_page_path(path);
    }
    Ok(config)
}

fn report_to_js(report: &BootstrapReport) -> Result<JsValue, JsValue> {
    let result = js_sys::Object::new();
    let snapshot = report
        .outcome
        .as_ref()
        .and_then(|o| o.snapshot())
        .map(BasketSnapshot::to_json)
        .transpose()
        .map_err(to_js)?;
    Reflect::set(
        &result,
        &JsValue::from_str("snapshot"),
        &snapshot.map_or(JsValue::NULL, |s| JsValue::from_str(&s)),
    )?;
    Reflect::set(
        &result,
        &JsValue::from_str("restored"),
        &JsValue::from(report.restore.as_ref().map_or(0, |b| b.dispatched() as u32)),
    )?;
    Reflect::set(&result, &JsValue::from_str("redirected"), &JsValue::from(report.redirected))?;
    Reflect::set(
        &result,
        &JsValue::from_str("deleteHandlers"),
        &JsValue::from(report.delete_handlers as u32),
    )?;
    Ok(result.into())
}

// =============================================================================
// Public wasm_bindgen API
// =============================================================================

/// Return the basketsync library version.
#[wasm_bindgen]
pub fn basketsync_version() -> String {
    VERSION.to_string()
}

/// Object-style handle for pages that want to drive reconciliation themselves.
#[wasm_bindgen]
pub struct BasketCookie {
    inner: BasketReconciler,
}

#[wasm_bindgen]
impl BasketCookie {
    /// `new BasketCookie({ productCookie: 'prData', serverEndpoint: '/cart' })`
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<BasketCookie, JsValue> {
        logging::init();
        let config = read_options(&options)?;
        let platform = browser_platform().map_err(to_js)?;
        Ok(Self {
            inner: BasketReconciler::new(config, platform),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> String {
        VERSION.to_string()
    }

    #[wasm_bindgen(getter, js_name = productCookie)]
    pub fn product_cookie(&self) -> String {
        self.inner.config().cookie_name.clone()
    }

    #[wasm_bindgen(getter, js_name = serverEndpoint)]
    pub fn server_endpoint(&self) -> String {
        self.inner.config().server_endpoint.clone()
    }

    /// JSON snapshot of the rendered rows, or `null` when there are none.
    pub fn snapshot(&self) -> Result<Option<String>, JsValue> {
        self.inner
            .snapshot()
            .and_then(|s| s.map(|s| s.to_json()).transpose())
            .map_err(to_js)
    }

    /// Reconcile the cookie with the rendered basket. Returns the current
    /// basket as JSON, or `null` when there is none.
    pub fn reconcile(&self) -> Result<Option<String>, JsValue> {
        let outcome = self.inner.reconcile().map_err(to_js)?;
        outcome.snapshot().map(BasketSnapshot::to_json).transpose().map_err(to_js)
    }

    /// Send each object of a JSON array to the server as its own form post.
    /// Returns the number of requests started, or `false` when the input
    /// holds no objects.
    #[wasm_bindgen(js_name = addItems)]
    pub fn add_items(&self, items_json: Option<String>) -> JsValue {
        let items = items_json.and_then(|json| match parse_item_list(&json) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!("addItems ignored invalid input: {e}");
                None
            }
        });
        match self.inner.add_items(items.as_deref()) {
            Some(batch) => JsValue::from(batch.dispatched() as u32),
            None => JsValue::FALSE,
        }
    }

    #[wasm_bindgen(js_name = deleteCookie)]
    pub fn delete_cookie(&self) -> Result<(), JsValue> {
        self.inner.delete_cookie().map_err(to_js)
    }

    /// Run the page-ready flow now.
    #[wasm_bindgen(js_name = onPageReady)]
    pub fn on_page_ready(&self) -> Result<JsValue, JsValue> {
        let report = self.inner.on_page_ready().map_err(to_js)?;
        report_to_js(&report)
    }

    /// Run the page-ready flow on `DOMContentLoaded`, or immediately if the
    /// document has already finished parsing.
    pub fn install(&self) -> Result<(), JsValue> {
        let window = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No global `window` object found"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let reconciler = self.inner.clone();
        let run = move || {
            if let Err(e) = reconciler.on_page_ready() {
                console_log(&format!("basketsync: page bootstrap failed: {e}"));
            }
        };

        if document.ready_state() != "loading" {
            run();
            return Ok(());
        }

        let on_ready = Closure::once(move |_event: Event| run());
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    }
}

/// Create a reconciler from `options` and attach it to `DOMContentLoaded`.
#[wasm_bindgen]
pub fn install_basket_sync(options: JsValue) -> Result<(), JsValue> {
    BasketCookie::new(options)?.install()
}
