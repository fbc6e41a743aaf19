use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use basketsync_core::error::BasketSyncError;
use basketsync_core::traits::storage::CookieJar;

/// Cookie jar backed by `document.cookie`.
pub struct DocumentCookieJar {
    document: HtmlDocument,
}

impl DocumentCookieJar {
    pub fn new(document: &web_sys::Document) -> Result<Self, BasketSyncError> {
        let document = document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| BasketSyncError::Platform("document is not an HTML document".to_string()))?;
        Ok(Self { document })
    }
}

impl CookieJar for DocumentCookieJar {
    fn cookie_header(&self) -> Result<String, BasketSyncError> {
        self.document
            .cookie()
            .map_err(|e| BasketSyncError::Storage(format!("reading document.cookie failed: {:?}", e)))
    }

    fn apply(&self, assignment: &str) -> Result<(), BasketSyncError> {
        self.document
            .set_cookie(assignment)
            .map_err(|e| BasketSyncError::Storage(format!("writing document.cookie failed: {:?}", e)))
    }
}
