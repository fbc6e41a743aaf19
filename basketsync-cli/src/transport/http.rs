use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use basketsync_core::basket::ItemFields;
use basketsync_core::error::BasketSyncError;
use basketsync_core::sync::QuickCartResponse;
use basketsync_core::traits::transport::CartTransport;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport posting form-encoded items to the storefront.
///
/// Endpoints are site paths (`/cart`) resolved against `origin`.
pub struct HttpTransport {
    client: reqwest::Client,
    origin: Url,
}

impl HttpTransport {
    pub fn new(origin: &str) -> Result<Self, BasketSyncError> {
        let origin = Url::parse(origin)
            .map_err(|e| BasketSyncError::Transport(format!("invalid origin {origin}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BasketSyncError::Transport(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client, origin })
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, BasketSyncError> {
        self.origin
            .join(endpoint)
            .map_err(|e| BasketSyncError::Transport(format!("invalid endpoint {endpoint}: {e}")))
    }

    /// Form POST carrying every field of the item.
    fn build_request(
        &self,
        endpoint: &str,
        fields: &ItemFields,
    ) -> Result<reqwest::Request, BasketSyncError> {
        let url = self.endpoint_url(endpoint)?;
        self.client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(fields.pairs())
            .build()
            .map_err(|e| BasketSyncError::Transport(format!("request build failed: {e}")))
    }
}

#[async_trait(?Send)]
impl CartTransport for HttpTransport {
    /// POST {origin}{endpoint}, body `sku=..&<sku>.qty=..` plus any other
    /// stored fields.
    async fn quick_add(
        &self,
        endpoint: &str,
        fields: &ItemFields,
    ) -> Result<QuickCartResponse, BasketSyncError> {
        let request = self.build_request(endpoint, fields)?;
        debug!("POST {} for {}", request.url(), fields.sku().unwrap_or("<no sku>"));

        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| BasketSyncError::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BasketSyncError::Transport(format!("unexpected status {status}")));
        }

        resp.json::<QuickCartResponse>()
            .await
            .map_err(|e| BasketSyncError::Transport(format!("JSON parse failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_resolves_against_origin() {
        let transport = HttpTransport::new("https://shop.example.com/en/").unwrap();
        assert_eq!(
            transport.endpoint_url("/cart/quickAdd").unwrap().as_str(),
            "https://shop.example.com/cart/quickAdd"
        );
    }

    #[test]
    fn test_form_body_carries_every_field() {
        let transport = HttpTransport::new("http://localhost:8080").unwrap();
        let fields = ItemFields::new(vec![
            ("sku".to_string(), "A1".to_string()),
            ("A1.qty".to_string(), "1".to_string()),
            ("colour".to_string(), "dark red".to_string()),
        ]);

        let request = transport.build_request("/cart", &fields).unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.headers()["content-type"],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"sku=A1&A1.qty=1&colour=dark+red");
    }

    #[test]
    fn test_rejects_invalid_origin() {
        assert!(matches!(
            HttpTransport::new("not a url"),
            Err(BasketSyncError::Transport(_))
        ));
    }
}
