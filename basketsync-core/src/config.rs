use std::env;

use serde::Deserialize;

use crate::constants::{BASKET_PAGE_PATH, DEFAULT_COOKIE_NAME, DEFAULT_SERVER_ENDPOINT};
use crate::error::Result;

/// Reconciler settings supplied at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReconcilerConfig {
    /// Name of the snapshot cookie.
    #[serde(alias = "productCookie")]
    pub cookie_name: String,
    /// Endpoint receiving one POST per item.
    pub server_endpoint: String,
    /// Where to send the shopper after restoring a basket from the cookie.
    pub basket_page_path: String,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            server_endpoint: DEFAULT_SERVER_ENDPOINT.to_string(),
            basket_page_path: BASKET_PAGE_PATH.to_string(),
        }
    }
}

impl ReconcilerConfig {
    /// Parse a JSON options object. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load configuration from environment variables.
    ///
    /// - `BASKETSYNC_COOKIE_NAME` (default `productData`)
    /// - `BASKETSYNC_ENDPOINT` (default `/cart`)
    /// - `BASKETSYNC_BASKET_PATH` (default `/cart`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cookie_name: env::var("BASKETSYNC_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            server_endpoint: env::var("BASKETSYNC_ENDPOINT").unwrap_or(defaults.server_endpoint),
            basket_page_path: env::var("BASKETSYNC_BASKET_PATH")
                .unwrap_or(defaults.basket_page_path),
        }
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_server_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.server_endpoint = endpoint.into();
        self
    }

    pub fn with_basket_page_path(mut self, path: impl Into<String>) -> Self {
        self.basket_page_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.cookie_name, "productData");
        assert_eq!(config.server_endpoint, "/cart");
        assert_eq!(config.basket_page_path, "/cart");
    }

    #[test]
    fn test_from_json_partial_options() {
        let config = ReconcilerConfig::from_json(r#"{"productCookie":"prData"}"#).unwrap();
        assert_eq!(config.cookie_name, "prData");
        assert_eq!(config.server_endpoint, "/cart");

        let config =
            ReconcilerConfig::from_json(r#"{"cookieName":"c","serverEndpoint":"/cart/quickAdd"}"#)
                .unwrap();
        assert_eq!(config.cookie_name, "c");
        assert_eq!(config.server_endpoint, "/cart/quickAdd");
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        assert!(ReconcilerConfig::from_json(r#"{"serverEndpoint":5}"#).is_err());
    }
}
