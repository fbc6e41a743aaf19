//! Page-ready wiring: decide between reconcile and restore, then arm the
//! delete buttons.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::cookie;
use crate::error::Result;
use crate::reconciler::BasketReconciler;
use crate::sync::{QuickAddBatch, ReconcileOutcome};
use crate::traits::storage::CookieJar;

/// What happened during [`BasketReconciler::on_page_ready`].
#[derive(Debug, Clone, Default)]
pub struct BootstrapReport {
    /// Set on the basket page.
    pub outcome: Option<ReconcileOutcome>,
    /// Set when another page restored the basket from the cookie.
    pub restore: Option<QuickAddBatch>,
    /// Whether the shopper was sent to the basket page.
    pub redirected: bool,
    /// Delete buttons that received the cookie-clearing handler.
    pub delete_handlers: usize,
}

/// Click behavior for delete buttons.
///
/// The basket size is captured when the handler is built; later deletions do
/// not update it. Only a page that loaded with exactly one item clears the
/// cookie through this path.
pub struct DeleteButtonHandler {
    captured_len: usize,
    jar: Rc<dyn CookieJar>,
    cookie_name: String,
}

impl DeleteButtonHandler {
    pub fn new(captured_len: usize, jar: Rc<dyn CookieJar>, cookie_name: impl Into<String>) -> Self {
        Self {
            captured_len,
            jar,
            cookie_name: cookie_name.into(),
        }
    }

    /// Returns whether the cookie was deleted.
    pub fn on_click(&self) -> Result<bool> {
        if self.captured_len != 1 {
            debug!(
                "Delete clicked with {} items at load; keeping cookie",
                self.captured_len
            );
            return Ok(false);
        }
        cookie::delete_cookie(self.jar.as_ref(), &self.cookie_name)?;
        info!("Last basket item deleted; cleared cookie {}", self.cookie_name);
        Ok(true)
    }
}

/// Read a header count the way JavaScript's unary `+` reads text:
/// surrounding whitespace is ignored, blank text is zero and unsigned
/// `0x`/`0o`/`0b` literals are integers. `None` stands for NaN.
pub fn parse_header_count(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }
    // Rust also accepts "inf" and "nan" spellings; JavaScript only knows
    // "Infinity".
    let js_infinity = matches!(trimmed, "Infinity" | "+Infinity" | "-Infinity");
    if !js_infinity
        && trimmed
            .chars()
            .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

impl BasketReconciler {
    /// Run once the page is ready.
    ///
    /// On the basket page the cookie is reconciled against the rendered rows.
    /// Elsewhere, an empty quick cart header plus a stored cookie means the
    /// server lost the basket: its items are re-added and the shopper is sent
    /// to the basket page. Either way, delete buttons are armed when the page
    /// shows any rows.
    pub fn on_page_ready(&self) -> Result<BootstrapReport> {
        let platform = self.platform();
        let mut report = BootstrapReport::default();

        if platform.page.is_basket_page()? {
            report.outcome = Some(self.reconcile()?);
        } else {
            let header = platform.page.header_item_count()?;
            let has_cookie = self
                .read_cookie()?
                .is_some_and(|value| !value.is_empty());

            if parse_header_count(&header) == Some(0.0) && has_cookie {
                report.restore = self.add_items_from_cookie()?;
                platform.page.navigate(&self.config().basket_page_path)?;
                report.redirected = true;
                info!(
                    "Restored basket from cookie; redirecting to {}",
                    self.config().basket_page_path
                );
            }
        }

        if let Some(snapshot) = self.snapshot()? {
            let handler = DeleteButtonHandler::new(
                snapshot.len(),
                Rc::clone(&platform.jar),
                self.config().cookie_name.clone(),
            );
            let callback = Rc::new(move || {
                if let Err(e) = handler.on_click() {
                    warn!("Clearing basket cookie failed: {e}");
                }
            });
            report.delete_handlers = platform.page.attach_delete_handler(callback)?;
            debug!("Armed {} delete buttons", report.delete_handlers);
        }

        Ok(report)
    }
}
