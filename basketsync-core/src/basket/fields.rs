use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::basket::BasketItem;
use crate::error::Result;

/// Form fields of one item exactly as a stored list holds them.
///
/// Unlike [`BasketItem`] nothing is required: an object without its
/// `<sku>.qty` key, or with extra keys, is still sent field for field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    pairs: Vec<(String, String)>,
}

impl ItemFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Key/value pairs in their stored order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn sku(&self) -> Option<&str> {
        self.get("sku")
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl From<&BasketItem> for ItemFields {
    fn from(item: &BasketItem) -> Self {
        Self::new(vec![
            ("sku".to_string(), item.sku.clone()),
            (item.qty_key(), item.qty.clone()),
        ])
    }
}

/// Text a form encoder would send for a JSON value.
fn form_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for ItemFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ItemFieldsVisitor)
    }
}

struct ItemFieldsVisitor;

impl<'de> Visitor<'de> for ItemFieldsVisitor {
    type Value = ItemFields;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<ItemFields, A::Error> {
        let mut pairs = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let value: Value = map.next_value()?;
            pairs.push((key, form_text(value)));
        }
        Ok(ItemFields { pairs })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Object(ItemFields),
    Other(IgnoredAny),
}

/// Decode a JSON array into the fields of each object in it.
///
/// Entries that are not objects are skipped. Only text that is not a JSON
/// array is an error.
pub fn parse_item_list(text: &str) -> Result<Vec<ItemFields>> {
    let entries: Vec<ListEntry> = serde_json::from_str(text)?;
    let total = entries.len();

    let items: Vec<ItemFields> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            ListEntry::Object(fields) => Some(fields),
            ListEntry::Other(IgnoredAny) => None,
        })
        .collect();

    if items.len() < total {
        warn!("Skipped {} basket entries that are not objects", total - items.len());
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BasketSyncError;

    #[test]
    fn test_from_item_uses_dynamic_key() {
        let fields = ItemFields::from(&BasketItem::new("A123", "2"));
        assert_eq!(
            fields.pairs(),
            &[
                ("sku".to_string(), "A123".to_string()),
                ("A123.qty".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_every_object() {
        let items = parse_item_list(r#"[{"sku":"A1","A1.qty":"1"},{"sku":"B2"}]"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], ItemFields::from(&BasketItem::new("A1", "1")));
        assert_eq!(items[1].sku(), Some("B2"));
        assert_eq!(items[1].len(), 1);
    }

    #[test]
    fn test_parse_keeps_extra_fields_in_order() {
        let items =
            parse_item_list(r#"[{"colour":"red","sku":"A1","A1.qty":2,"gift":true,"note":null}]"#)
                .unwrap();
        let keys: Vec<&str> = items[0].pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["colour", "sku", "A1.qty", "gift", "note"]);
        assert_eq!(items[0].get("A1.qty"), Some("2"));
        assert_eq!(items[0].get("gift"), Some("true"));
        assert_eq!(items[0].get("note"), Some(""));
    }

    #[test]
    fn test_parse_skips_non_objects() {
        let items = parse_item_list(r#"[1,"x",{"sku":"C3"},null]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku(), Some("C3"));
    }

    #[test]
    fn test_parse_empty_array_is_empty() {
        assert!(parse_item_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_item_list(r#"{"sku":"A1"}"#),
            Err(BasketSyncError::Serialization(_))
        ));
        assert!(parse_item_list("not-json").is_err());
    }
}
