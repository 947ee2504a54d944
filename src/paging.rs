//! pagination helpers
//!
//! accumulator for graph-style paged collections, where each page carries a
//! `paging.next` url whose query parameters select the following page.

use serde_json::{Map, Value};
use std::collections::HashMap;
use url::Url;

/// running aggregate of a paged read
#[derive(Debug, Default)]
pub(crate) struct PageAccumulator {
    result: Option<Map<String, Value>>,
}

impl PageAccumulator {
    pub(crate) fn new() -> Self {
        Self { result: None }
    }

    /// fold one response page into the aggregate.
    ///
    /// the first page is adopted whole; later pages only contribute their
    /// `data` items, in fetch order. returns the query parameters of the
    /// next page when there is one to follow.
    pub(crate) fn push(&mut self, mut page: Map<String, Value>) -> Option<HashMap<String, String>> {
        if !page.contains_key("paging") {
            if self.result.is_none() {
                self.result = Some(page);
            }
            return None;
        }

        let next = next_params(&page);

        if let Some(result) = &mut self.result {
            if let Some(Value::Array(items)) = page.remove("data") {
                match result.get_mut("data") {
                    Some(Value::Array(acc)) => acc.extend(items),
                    _ => {
                        result.insert("data".to_string(), Value::Array(items));
                    }
                }
            }
        } else {
            self.result = Some(page);
        }

        next
    }

    /// consume the accumulator, stripping any residual `paging` key
    pub(crate) fn finish(self) -> Map<String, Value> {
        let mut result = self.result.unwrap_or_default();
        result.remove("paging");
        result
    }
}

/// extract the query parameters of a `paging.next` url
fn next_params(page: &Map<String, Value>) -> Option<HashMap<String, String>> {
    let next = page.get("paging")?.get("next")?.as_str()?;
    let url = Url::parse(next).ok()?;
    Some(
        url.query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_single_page_without_paging() {
        let mut pages = PageAccumulator::new();
        let next = pages.push(object(json!({"id": "1", "name": "a"})));
        assert!(next.is_none());
        assert_eq!(
            Value::Object(pages.finish()),
            json!({"id": "1", "name": "a"})
        );
    }

    #[test]
    fn test_paging_key_is_stripped() {
        let mut pages = PageAccumulator::new();
        let next = pages.push(object(json!({"data": [1], "paging": {"cursors": {}}})));
        assert!(next.is_none());
        assert_eq!(Value::Object(pages.finish()), json!({"data": [1]}));
    }

    #[test]
    fn test_data_concatenated_in_fetch_order() {
        let mut pages = PageAccumulator::new();

        let next = pages.push(object(json!({
            "data": [1, 2],
            "paging": {"next": "https://graph.facebook.com/v2.8/me/feed?after=c1&limit=2"}
        })));
        let next = next.expect("first page should have a next");
        assert_eq!(next["after"], "c1");
        assert_eq!(next["limit"], "2");

        let next = pages.push(object(json!({
            "data": [3],
            "paging": {"next": "https://graph.facebook.com/v2.8/me/feed?after=c2&limit=2"}
        })));
        assert!(next.is_some());

        let next = pages.push(object(json!({"data": [4], "paging": {}})));
        assert!(next.is_none());

        let result = pages.finish();
        assert_eq!(result["data"], json!([1, 2, 3, 4]));
        assert!(!result.contains_key("paging"));
    }

    #[test]
    fn test_first_page_top_level_keys_preserved() {
        let mut pages = PageAccumulator::new();
        pages.push(object(json!({
            "data": [1],
            "summary": {"total_count": 2},
            "paging": {"next": "https://graph.facebook.com/v2.8/me/feed?after=c1"}
        })));
        pages.push(object(json!({"data": [2], "paging": {}})));

        let result = pages.finish();
        assert_eq!(result["summary"], json!({"total_count": 2}));
        assert_eq!(result["data"], json!([1, 2]));
    }

    #[test]
    fn test_later_page_without_data_contributes_nothing() {
        let mut pages = PageAccumulator::new();
        pages.push(object(json!({
            "data": [1],
            "paging": {"next": "https://graph.facebook.com/v2.8/me/feed?after=c1"}
        })));
        let next = pages.push(object(json!({"paging": {}})));
        assert!(next.is_none());
        assert_eq!(pages.finish()["data"], json!([1]));
    }

    #[test]
    fn test_page_without_paging_after_first_is_ignored() {
        let mut pages = PageAccumulator::new();
        pages.push(object(json!({
            "data": [1],
            "paging": {"next": "https://graph.facebook.com/v2.8/me/feed?after=c1"}
        })));
        let next = pages.push(object(json!({"data": [9]})));
        assert!(next.is_none());
        assert_eq!(pages.finish()["data"], json!([1]));
    }

    #[test]
    fn test_next_params_absent() {
        let page = object(json!({"data": [], "paging": {"previous": "x"}}));
        assert!(next_params(&page).is_none());
    }

    #[test]
    fn test_next_params_extraction() {
        let page = object(json!({
            "paging": {"next": "https://graph.facebook.com/v2.8/me/photos?access_token=t2&type=uploaded&after=abc"}
        }));
        let params = next_params(&page).unwrap();
        assert_eq!(params["access_token"], "t2");
        assert_eq!(params["type"], "uploaded");
        assert_eq!(params["after"], "abc");
    }
}
