//! Listing pages.
//!
//! A [`Page`] is one bounded slice of a larger collection together with the
//! pagination metadata the server sent along. Offset pages report a `total`;
//! cursor pages (followed artists) only report `next` and a cursor.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
    pub before: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
    pub href: Option<String>,
    #[serde(default)]
    pub offset: u32,
    pub limit: Option<u32>,
    pub total: Option<u32>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub cursors: Option<Cursors>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            href: None,
            offset: 0,
            limit: None,
            total: None,
            next: None,
            previous: None,
            cursors: None,
        }
    }

    /// Whether the collection continues past this page.
    ///
    /// A known total is authoritative as long as the page made progress;
    /// an empty page, or one without a total, defers to the next link. The
    /// server caps offsets below some reported totals, so an empty page with
    /// a larger total is the end.
    pub fn has_more(&self) -> bool {
        match self.total {
            Some(total) if !self.items.is_empty() => {
                (self.offset as usize).saturating_add(self.items.len()) < total as usize
            }
            _ => self.next.is_some(),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Offset at which the following page starts, or `None` when there is
    /// nothing further or the offset would not advance.
    pub fn next_offset(&self) -> Option<u32> {
        if !self.has_more() {
            return None;
        }
        let len = u32::try_from(self.items.len()).ok()?;
        self.offset.checked_add(len).filter(|next| *next > self.offset)
    }

    pub fn after_cursor(&self) -> Option<&str> {
        self.cursors.as_ref().and_then(|c| c.after.as_deref())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            href: self.href,
            offset: self.offset,
            limit: self.limit,
            total: self.total,
            next: self.next,
            previous: self.previous,
            cursors: self.cursors,
        }
    }

    /// Builds a page from a listing object, tolerating missing or mistyped
    /// metadata. Every entry of `items` goes through `item`.
    pub(crate) fn from_value(value: &Value, item: impl FnMut(Value) -> T) -> Self {
        let items = value
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let string = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let number = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
        };

        let cursors = value.get("cursors").and_then(|c| {
            let field = |key: &str| c.get(key).and_then(Value::as_str).map(str::to_string);
            c.is_object().then(|| Cursors {
                after: field("after"),
                before: field("before"),
            })
        });

        Self {
            items: items.into_iter().map(item).collect(),
            href: string("href"),
            offset: number("offset").unwrap_or(0),
            limit: number("limit"),
            total: number("total"),
            next: string("next"),
            previous: string("previous"),
            cursors,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: Vec<u32>, offset: u32, total: Option<u32>, next: Option<&str>) -> Page<u32> {
        Page {
            items,
            offset,
            total,
            next: next.map(str::to_string),
            ..Page::empty()
        }
    }

    #[test]
    fn total_decides_has_more() {
        assert!(page(vec![1, 2, 3], 0, Some(10), None).has_more());
        assert!(!page(vec![1, 2, 3], 0, Some(3), Some("https://next")).has_more());
        assert!(!page(vec![1, 2], 8, Some(10), None).has_more());
    }

    #[test]
    fn next_link_decides_without_total() {
        assert!(page(vec![1], 0, None, Some("https://next")).has_more());
        assert!(!page(vec![1], 0, None, None).has_more());
    }

    #[test]
    fn next_offset_follows_items() {
        assert_eq!(page(vec![1, 2, 3], 3, Some(10), None).next_offset(), Some(6));
        assert_eq!(page(vec![1, 2, 3], 7, Some(10), None).next_offset(), None);
    }

    #[test]
    fn empty_page_past_the_offset_cap_ends_paging() {
        let capped = page(vec![], 1000, Some(5000), None);
        assert!(!capped.has_more());
        assert_eq!(capped.next_offset(), None);

        let linked = page(vec![], 1000, Some(5000), Some("https://next"));
        assert!(linked.has_more());
        assert_eq!(linked.next_offset(), None);
    }

    #[test]
    fn items_without_default_deserialize() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Item {
            id: String,
        }

        let page: Page<Item> =
            serde_json::from_str(r#"{"items":[{"id":"a"}],"total":1}"#).unwrap();
        assert_eq!(page.items, vec![Item { id: "a".into() }]);
        assert!(!page.has_more());

        let page: Page<Item> = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn lenient_metadata() {
        let value = serde_json::json!({
            "items": [1, 2],
            "offset": "zero",
            "total": 5,
            "cursors": { "after": "abc" }
        });
        let page = Page::from_value(&value, |v| v.as_u64().unwrap_or(0));
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.offset, 0);
        assert_eq!(page.total, Some(5));
        assert_eq!(page.after_cursor(), Some("abc"));
        assert!(page.has_more());
    }
}
