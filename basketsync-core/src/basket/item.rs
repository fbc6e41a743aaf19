use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::QTY_KEY_SUFFIX;

/// One basket line.
///
/// On the wire the quantity lives under a key derived from the SKU, so an
/// item with SKU `A123` serializes as `{"sku":"A123","A123.qty":"2"}`. Field
/// order is part of the format: `sku` always comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketItem {
    pub sku: String,
    pub qty: String,
}

impl BasketItem {
    pub fn new(sku: impl Into<String>, qty: impl Into<String>) -> Self {
        Self { sku: sku.into(), qty: qty.into() }
    }

    /// The dynamic quantity field name, `<sku>.qty`.
    pub fn qty_key(&self) -> String {
        qty_key_for(&self.sku)
    }
}

fn qty_key_for(sku: &str) -> String {
    format!("{sku}{QTY_KEY_SUFFIX}")
}

impl Serialize for BasketItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("sku", &self.sku)?;
        map.serialize_entry(&self.qty_key(), &self.qty)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for BasketItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BasketItemVisitor)
    }
}

struct BasketItemVisitor;

impl<'de> Visitor<'de> for BasketItemVisitor {
    type Value = BasketItem;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a basket item object with `sku` and `<sku>.qty` fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<BasketItem, A::Error> {
        // The quantity key is only known once `sku` has been seen, so buffer
        // every other string field until the end.
        let mut sku: Option<String> = None;
        let mut others: Vec<(String, serde_json::Value)> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == "sku" {
                if sku.is_some() {
                    return Err(de::Error::duplicate_field("sku"));
                }
                sku = Some(map.next_value()?);
            } else {
                others.push((key, map.next_value()?));
            }
        }

        let sku = sku.ok_or_else(|| de::Error::missing_field("sku"))?;
        let wanted = qty_key_for(&sku);
        let value = match others.into_iter().find(|(k, _)| *k == wanted) {
            Some((_, value)) => value,
            None => return Err(de::Error::custom(format!("missing field `{wanted}`"))),
        };
        let qty = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(de::Error::custom(format!(
                    "field `{wanted}` must be a string or number, got {other}"
                )))
            }
        };

        Ok(BasketItem { sku, qty })
    }
}
