use tracing::{debug, info, warn};

use crate::basket::{extract_snapshot, parse_item_list, BasketSnapshot, ItemFields};
use crate::config::ReconcilerConfig;
use crate::cookie::{cookie_expiry, delete_cookie, read_cookie, write_cookie};
use crate::error::Result;
use crate::reconciler::Platform;
use crate::sync::quick_add::{add_items_to_basket, QuickAddBatch};

/// What to do given the cookie and the rendered basket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<'a> {
    /// Cookie present, basket absent: send the cookie's items to the server.
    Restore { cookie: &'a str },
    /// Both present and the cookie already holds the basket's exact text.
    Keep,
    /// Both present but different: the page wins, rewrite the cookie.
    Overwrite,
    /// Basket present, no cookie: write one.
    Persist,
    /// Neither present: delete the cookie anyway.
    Clear,
}

/// Pick one of the four branches. An empty cookie value counts as absent.
pub fn decide<'a>(
    cookie: Option<&'a str>,
    basket: Option<&BasketSnapshot>,
) -> Result<Decision<'a>> {
    let cookie = cookie.filter(|value| !value.is_empty());
    let decision = match (cookie, basket) {
        (Some(cookie), None) => Decision::Restore { cookie },
        (Some(cookie), Some(basket)) => {
            if basket.matches_serialized(cookie)? {
                Decision::Keep
            } else {
                Decision::Overwrite
            }
        }
        (None, Some(_)) => Decision::Persist,
        (None, None) => Decision::Clear,
    };
    Ok(decision)
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone)]
pub enum ReconcileOutcome {
    /// Cookie items were handed to the quick-add fan-out. `batch` is `None`
    /// when the cookie is not a JSON array or holds no objects.
    Restored { batch: Option<QuickAddBatch> },
    /// Cookie already matched the basket; nothing written.
    Unchanged(BasketSnapshot),
    /// Cookie overwritten with the basket.
    Refreshed(BasketSnapshot),
    /// Cookie created from the basket.
    Persisted(BasketSnapshot),
    /// Cookie deleted; there is no snapshot.
    Cleared,
}

impl ReconcileOutcome {
    /// The current basket, for the branches that return it.
    pub fn snapshot(&self) -> Option<&BasketSnapshot> {
        match self {
            ReconcileOutcome::Unchanged(s)
            | ReconcileOutcome::Refreshed(s)
            | ReconcileOutcome::Persisted(s) => Some(s),
            ReconcileOutcome::Restored { .. } | ReconcileOutcome::Cleared => None,
        }
    }

    pub fn wrote_cookie(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::Refreshed(_) | ReconcileOutcome::Persisted(_)
        )
    }
}

/// Decode a cookie value into the fields of each stored item, logging
/// instead of failing. Items are not validated; each object is sent as is.
pub(crate) fn decode_cookie_items(cookie: &str) -> Option<Vec<ItemFields>> {
    match parse_item_list(cookie) {
        Ok(items) => Some(items),
        Err(e) => {
            warn!("Ignoring undecodable basket cookie: {e}");
            None
        }
    }
}

/// Compare the rendered basket with the snapshot cookie and act on it.
pub fn reconcile(platform: &Platform, config: &ReconcilerConfig) -> Result<ReconcileOutcome> {
    let basket = extract_snapshot(platform.page.as_ref())?;
    let cookie = read_cookie(platform.jar.as_ref(), &config.cookie_name)?;

    let decision = decide(cookie.as_deref(), basket.as_ref())?;
    debug!("Reconciliation decision: {decision:?}");

    let outcome = match (decision, basket) {
        (Decision::Restore { cookie }, _) => {
            let items = decode_cookie_items(cookie);
            let batch = add_items_to_basket(
                items.as_deref(),
                &config.server_endpoint,
                platform,
            );
            ReconcileOutcome::Restored { batch }
        }
        (Decision::Keep, Some(basket)) => ReconcileOutcome::Unchanged(basket),
        (Decision::Overwrite, Some(basket)) => {
            store_snapshot(platform, config, &basket)?;
            ReconcileOutcome::Refreshed(basket)
        }
        (Decision::Persist, Some(basket)) => {
            store_snapshot(platform, config, &basket)?;
            ReconcileOutcome::Persisted(basket)
        }
        (Decision::Clear, _) | (_, None) => {
            delete_cookie(platform.jar.as_ref(), &config.cookie_name)?;
            ReconcileOutcome::Cleared
        }
    };

    info!(
        "Reconciled basket cookie {}: {}",
        config.cookie_name,
        outcome_label(&outcome)
    );
    Ok(outcome)
}

fn store_snapshot(
    platform: &Platform,
    config: &ReconcilerConfig,
    basket: &BasketSnapshot,
) -> Result<()> {
    let expires = cookie_expiry(platform.clock.as_ref())?;
    write_cookie(
        platform.jar.as_ref(),
        &config.cookie_name,
        &basket.to_json()?,
        expires,
    )
}

fn outcome_label(outcome: &ReconcileOutcome) -> &'static str {
    match outcome {
        ReconcileOutcome::Restored { .. } => "restored",
        ReconcileOutcome::Unchanged(_) => "unchanged",
        ReconcileOutcome::Refreshed(_) => "refreshed",
        ReconcileOutcome::Persisted(_) => "persisted",
        ReconcileOutcome::Cleared => "cleared",
    }
}
