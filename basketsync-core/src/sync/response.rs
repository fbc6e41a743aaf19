use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary returned by the cart endpoint after each quick-add.
///
/// `quickCartItems` and `quickCartValue` may be strings or numbers; they are
/// shown in the header verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickCartResponse {
    #[serde(rename = "quickCartItems", default)]
    pub quick_cart_items: Value,
    #[serde(rename = "quickCartValue", default)]
    pub quick_cart_value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuickCartResponse {
    pub fn new(items: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self {
            quick_cart_items: items.into(),
            quick_cart_value: value.into(),
            extra: Map::new(),
        }
    }

    pub fn items_text(&self) -> String {
        display_text(&self.quick_cart_items)
    }

    pub fn value_text(&self) -> String {
        display_text(&self.quick_cart_value)
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
