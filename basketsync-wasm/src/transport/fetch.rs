use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, UrlSearchParams};

use basketsync_core::basket::ItemFields;
use basketsync_core::error::BasketSyncError;
use basketsync_core::sync::QuickCartResponse;
use basketsync_core::traits::transport::CartTransport;

/// Fetch API-based HTTP transport for browser WASM.
///
/// Endpoints are same-origin paths such as `/cart`; relative URLs resolve
/// against the current page.
#[derive(Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }

    /// Get the browser's global `window` object for calling fetch.
    fn window() -> Result<web_sys::Window, BasketSyncError> {
        web_sys::window().ok_or_else(|| {
            BasketSyncError::Platform("No global `window` object found".to_string())
        })
    }

    /// Form-encode the item the way `$.ajax({ data: item })` would.
    fn form_body(fields: &ItemFields) -> Result<UrlSearchParams, BasketSyncError> {
        let params = UrlSearchParams::new()
            .map_err(|e| BasketSyncError::Transport(format!("URLSearchParams failed: {:?}", e)))?;
        for (key, value) in fields.pairs() {
            params.append(key, value);
        }
        Ok(params)
    }

    fn build_request(url: &str, body: &UrlSearchParams) -> Result<Request, BasketSyncError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::SameOrigin);
        opts.set_body(body.as_ref());

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| BasketSyncError::Transport(format!("Request creation failed: {:?}", e)))?;

        request
            .headers()
            .set("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
            .map_err(|e| BasketSyncError::Transport(format!("set Content-Type failed: {:?}", e)))?;
        request
            .headers()
            .set("X-Requested-With", "XMLHttpRequest")
            .map_err(|e| BasketSyncError::Transport(format!("set X-Requested-With failed: {:?}", e)))?;

        Ok(request)
    }

    /// Perform a fetch request and return the Response.
    async fn do_fetch(request: &Request) -> Result<Response, BasketSyncError> {
        let window = Self::window()?;
        let resp_value = JsFuture::from(window.fetch_with_request(request))
            .await
            .map_err(|e| BasketSyncError::Transport(format!("fetch failed: {:?}", e)))?;

        resp_value
            .dyn_into()
            .map_err(|_| BasketSyncError::Transport("response is not a Response".to_string()))
    }

    /// Read the body as text.
    async fn read_body_text(resp: &Response) -> Result<String, BasketSyncError> {
        let text_promise = resp
            .text()
            .map_err(|e| BasketSyncError::Transport(format!("text() failed: {:?}", e)))?;

        JsFuture::from(text_promise)
            .await
            .map_err(|e| BasketSyncError::Transport(format!("reading text failed: {:?}", e)))?
            .as_string()
            .ok_or_else(|| BasketSyncError::Transport("body text is not a string".to_string()))
    }

    /// Any 2xx counts as success.
    fn check_status(resp: &Response) -> Result<(), BasketSyncError> {
        if resp.ok() {
            Ok(())
        } else {
            Err(BasketSyncError::Transport(format!(
                "unexpected status {} {}",
                resp.status(),
                resp.status_text()
            )))
        }
    }
}

#[async_trait(?Send)]
impl CartTransport for FetchTransport {
    /// POST {endpoint} with the item as a form body; response is JSON.
    async fn quick_add(
        &self,
        endpoint: &str,
        fields: &ItemFields,
    ) -> Result<QuickCartResponse, BasketSyncError> {
        let body = Self::form_body(fields)?;
        let request = Self::build_request(endpoint, &body)?;
        let resp = Self::do_fetch(&request).await?;
        Self::check_status(&resp)?;

        let text = Self::read_body_text(&resp).await?;
        serde_json::from_str(&text)
            .map_err(|e| BasketSyncError::Transport(format!("JSON parse failed: {e}")))
    }
}
