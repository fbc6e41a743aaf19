use crate::error::BasketSyncError;

/// Document-scoped cookie storage, shaped like `document.cookie`.
///
/// Reads return the whole `name=value; name2=value2` header; writes take a
/// single assignment such as `name=value; expires=...`.
pub trait CookieJar {
    fn cookie_header(&self) -> Result<String, BasketSyncError>;
    fn apply(&self, assignment: &str) -> Result<(), BasketSyncError>;
}
