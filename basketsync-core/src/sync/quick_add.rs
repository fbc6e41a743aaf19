use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::basket::ItemFields;
use crate::reconciler::Platform;
use crate::sync::QuickCartResponse;
use crate::traits::display::HeaderDisplay;

/// Handle on a dispatched quick-add fan-out.
///
/// Requests complete on their own schedule. [`QuickAddBatch::results`] shows
/// whatever has arrived so far; right after dispatch that is usually nothing.
#[derive(Debug, Clone)]
pub struct QuickAddBatch {
    dispatched: usize,
    accumulator: Rc<RefCell<Vec<QuickCartResponse>>>,
}

impl QuickAddBatch {
    /// Number of requests started.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Responses received so far, in completion order.
    pub fn results(&self) -> Vec<QuickCartResponse> {
        self.accumulator.borrow().clone()
    }

    pub fn completed(&self) -> usize {
        self.accumulator.borrow().len()
    }
}

/// Start one independent create/update request per item, posting that
/// item's fields unchanged.
///
/// Returns `None` when there is nothing to send. Each successful response is
/// appended to the batch accumulator and written to the header, so the header
/// ends up showing the last response to arrive. Failures are logged and
/// dropped.
pub fn add_items_to_basket(
    items: Option<&[ItemFields]>,
    endpoint: &str,
    platform: &Platform,
) -> Option<QuickAddBatch> {
    let items = match items {
        Some(items) if !items.is_empty() => items,
        _ => {
            debug!("No items to add to the basket");
            return None;
        }
    };

    let accumulator = Rc::new(RefCell::new(Vec::with_capacity(items.len())));

    for fields in items {
        let fields = fields.clone();
        let endpoint = endpoint.to_string();
        let transport = Rc::clone(&platform.transport);
        let display = Rc::clone(&platform.display);
        let accumulator = Rc::clone(&accumulator);

        let task = async move {
            let sku = fields.sku().unwrap_or("<no sku>").to_string();
            match transport.quick_add(&endpoint, &fields).await {
                Ok(response) => {
                    debug!("Quick add for {sku} succeeded");
                    apply_response(display.as_ref(), &accumulator, response);
                }
                Err(e) => warn!("Quick add for {sku} failed: {e}"),
            }
        };
        platform.spawner.spawn_local(task.boxed_local());
    }

    info!("Dispatched {} quick-add requests to {endpoint}", items.len());

    Some(QuickAddBatch {
        dispatched: items.len(),
        accumulator,
    })
}

fn apply_response(
    display: &dyn HeaderDisplay,
    accumulator: &RefCell<Vec<QuickCartResponse>>,
    response: QuickCartResponse,
) {
    let items_text = response.items_text();
    let value_text = response.value_text();
    accumulator.borrow_mut().push(response);

    let updated = display
        .set_item_count(&items_text)
        .and_then(|()| display.set_total_value(&value_text));
    if let Err(e) = updated {
        warn!("Quick cart header update failed: {e}");
    }
}
