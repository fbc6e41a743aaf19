//! Basket data model: items with per-SKU quantity keys and ordered snapshots.

pub mod fields;
pub mod item;
pub mod snapshot;

pub use fields::{parse_item_list, ItemFields};
pub use item::BasketItem;
pub use snapshot::{extract_snapshot, BasketSnapshot};
