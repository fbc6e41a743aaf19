//! Browser storage: `document.cookie`.

pub mod document_cookie;

pub use document_cookie::DocumentCookieJar;
