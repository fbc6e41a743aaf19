use tracing::debug;

use crate::basket::BasketItem;
use crate::error::{BasketSyncError, Result};
use crate::traits::page::BasketPage;

/// The basket as extracted at one point in time.
///
/// Never empty: "no rows" is modelled as `Option::None` by
/// [`extract_snapshot`], because the reconciliation branches on presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketSnapshot {
    items: Vec<BasketItem>,
}

impl BasketSnapshot {
    /// Wrap `items`, or `None` when there are none.
    pub fn from_items(items: Vec<BasketItem>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Canonical JSON text. This is what gets stored in the cookie and what
    /// equality checks compare against.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Decode a JSON array of items. An empty array is rejected since it has
    /// no snapshot representation.
    pub fn from_json(text: &str) -> Result<Self> {
        let items: Vec<BasketItem> = serde_json::from_str(text)?;
        Self::from_items(items)
            .ok_or_else(|| BasketSyncError::InvalidData("snapshot contains no items".to_string()))
    }

    /// Exact text equality with the canonical encoding. Whitespace, field
    /// order and escaping differences all count as a mismatch.
    pub fn matches_serialized(&self, text: &str) -> Result<bool> {
        Ok(self.to_json()? == text)
    }
}

/// Build a snapshot from every rendered basket row.
pub fn extract_snapshot(page: &dyn BasketPage) -> Result<Option<BasketSnapshot>> {
    let rows = page.basket_rows()?;
    debug!("Extracted {} basket rows", rows.len());

    let items = rows
        .into_iter()
        .map(|row| BasketItem::new(row.sku, row.qty))
        .collect();
    Ok(BasketSnapshot::from_items(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticPage;
    use crate::traits::page::BasketRow;

    #[test]
    fn test_extract_zero_rows_is_absent() {
        let page = StaticPage::basket(vec![]);
        assert!(extract_snapshot(&page).unwrap().is_none());
    }

    #[test]
    fn test_extract_yields_one_item_per_row() {
        for n in 1..6 {
            let rows = (0..n).map(|i| BasketRow::new(format!("SKU{i}"), "1")).collect();
            let page = StaticPage::basket(rows);
            let snapshot = extract_snapshot(&page).unwrap().unwrap();
            assert_eq!(snapshot.len(), n);
        }
    }

    #[test]
    fn test_extract_keeps_row_order_and_raw_content() {
        let page = StaticPage::basket(vec![
            BasketRow::new(" Z9 ", "abc"),
            BasketRow::new("A1", ""),
        ]);
        let snapshot = extract_snapshot(&page).unwrap().unwrap();
        assert_eq!(snapshot.items()[0], BasketItem::new(" Z9 ", "abc"));
        assert_eq!(snapshot.items()[1], BasketItem::new("A1", ""));
    }

    #[test]
    fn test_extract_propagates_dom_failure() {
        let page = StaticPage::broken();
        assert!(matches!(extract_snapshot(&page), Err(BasketSyncError::Dom(_))));
    }

    #[test]
    fn test_to_json_is_compact_array() {
        let snapshot = BasketSnapshot::from_items(vec![
            BasketItem::new("A123", "2"),
            BasketItem::new("B1", "1"),
        ])
        .unwrap();
        assert_eq!(
            snapshot.to_json().unwrap(),
            r#"[{"sku":"A123","A123.qty":"2"},{"sku":"B1","B1.qty":"1"}]"#
        );
    }

    #[test]
    fn test_matches_serialized_is_text_equality() {
        let snapshot = BasketSnapshot::from_items(vec![BasketItem::new("A1", "1")]).unwrap();
        assert!(snapshot.matches_serialized(r#"[{"sku":"A1","A1.qty":"1"}]"#).unwrap());
        // Same structure, different text.
        assert!(!snapshot.matches_serialized(r#"[{"A1.qty":"1","sku":"A1"}]"#).unwrap());
        assert!(!snapshot.matches_serialized(r#"[{"sku": "A1", "A1.qty": "1"}]"#).unwrap());
    }

    #[test]
    fn test_from_json_rejects_empty_array() {
        assert!(matches!(
            BasketSnapshot::from_json("[]"),
            Err(BasketSyncError::InvalidData(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(matches!(
            BasketSnapshot::from_json(r#"{"sku":"A1","A1.qty":"1"}"#),
            Err(BasketSyncError::Serialization(_))
        ));
    }
}
