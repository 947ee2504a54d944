//! field retrieval
//!
//! sum types selecting between single and multi node/field requests, plus
//! the dispatching [`Client::get_fields`] entry point.

use crate::client::{Client, Params};
use crate::error::Result;
use serde_json::Value;

/// one node path or a list of node ids
#[derive(Debug, Clone, Copy)]
pub enum NodeSpec<'a> {
    /// a single node path (e.g. "me", "me/photos")
    Single(&'a str),
    /// several node ids, looked up through the root path in one request
    Many(&'a [&'a str]),
}

impl<'a> From<&'a str> for NodeSpec<'a> {
    fn from(node: &'a str) -> Self {
        NodeSpec::Single(node)
    }
}

impl<'a> From<&'a [&'a str]> for NodeSpec<'a> {
    fn from(nodes: &'a [&'a str]) -> Self {
        NodeSpec::Many(nodes)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for NodeSpec<'a> {
    fn from(nodes: &'a [&'a str; N]) -> Self {
        NodeSpec::Many(nodes)
    }
}

/// one field name or a list of field names
#[derive(Debug, Clone, Copy)]
pub enum FieldSpec<'a> {
    /// a single field
    Single(&'a str),
    /// several fields, comma-joined into one request
    Many(&'a [&'a str]),
}

impl<'a> From<&'a str> for FieldSpec<'a> {
    fn from(field: &'a str) -> Self {
        FieldSpec::Single(field)
    }
}

impl<'a> From<&'a [&'a str]> for FieldSpec<'a> {
    fn from(fields: &'a [&'a str]) -> Self {
        FieldSpec::Many(fields)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for FieldSpec<'a> {
    fn from(fields: &'a [&'a str; N]) -> Self {
        FieldSpec::Many(fields)
    }
}

/// resolved request target for one retrieval shape
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FieldQuery {
    /// node path to request ("/" for multi-node lookups)
    pub(crate) path: String,
    /// query parameters, including `fields` and possibly `ids`
    pub(crate) params: Params,
    /// whether a `data` payload should be unwrapped from the body
    pub(crate) unwrap: bool,
}

/// map a node/field selection onto a concrete request.
///
/// one-element lists degrade to their scalar counterpart, except that a
/// multi-node lookup always goes through the root path.
pub(crate) fn resolve<'a>(
    nodes: NodeSpec<'a>,
    fields: FieldSpec<'a>,
    params: Option<Params>,
) -> FieldQuery {
    let mut params = params.unwrap_or_default();
    match (nodes, fields) {
        (NodeSpec::Single(node), FieldSpec::Single(field)) => {
            params.insert("fields".to_string(), field.to_string());
            FieldQuery {
                path: node.to_string(),
                params,
                unwrap: true,
            }
        }
        (NodeSpec::Single(node), FieldSpec::Many(fields)) if fields.len() == 1 => {
            resolve(NodeSpec::Single(node), FieldSpec::Single(fields[0]), Some(params))
        }
        (NodeSpec::Single(node), FieldSpec::Many(fields)) => {
            params.insert("fields".to_string(), fields.join(","));
            FieldQuery {
                path: node.to_string(),
                params,
                unwrap: true,
            }
        }
        (NodeSpec::Many(nodes), FieldSpec::Single(field)) => {
            params.insert("ids".to_string(), nodes.join(","));
            params.insert("fields".to_string(), field.to_string());
            FieldQuery {
                path: "/".to_string(),
                params,
                unwrap: false,
            }
        }
        (NodeSpec::Many(nodes), FieldSpec::Many(fields)) if nodes.len() == 1 => {
            resolve(NodeSpec::Single(nodes[0]), FieldSpec::Many(fields), Some(params))
        }
        (NodeSpec::Many(nodes), FieldSpec::Many(fields)) if fields.len() == 1 => {
            resolve(NodeSpec::Many(nodes), FieldSpec::Single(fields[0]), Some(params))
        }
        (NodeSpec::Many(nodes), FieldSpec::Many(fields)) => {
            params.insert("ids".to_string(), nodes.join(","));
            params.insert("fields".to_string(), fields.join(","));
            FieldQuery {
                path: "/".to_string(),
                params,
                unwrap: false,
            }
        }
    }
}

/// unwrap the `data` payload if the body carries one
pub(crate) fn unwrap_data(mut response: Value) -> Value {
    match response.as_object_mut().and_then(|map| map.remove("data")) {
        Some(data) => data,
        None => response,
    }
}

impl Client {
    /// retrieve one or more fields from one or more nodes.
    ///
    /// single-node requests unwrap the `data` payload when the body carries
    /// one; multi-node requests return the raw mapping keyed by node id.
    ///
    /// # example
    ///
    /// ```no_run
    /// # use fbgraph::{Client, ClientConfig};
    /// # async fn example() -> fbgraph::Result<()> {
    /// # let client = Client::new(ClientConfig::new("token"))?;
    /// let name = client.get_fields("me", "name", None, None).await?;
    /// let both = client.get_fields("me", &["id", "name"], None, None).await?;
    /// let pair = client.get_fields(&["40796308305", "19292868552"], "name", None, None).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_fields<'a>(
        &self,
        nodes: impl Into<NodeSpec<'a>>,
        fields: impl Into<FieldSpec<'a>>,
        params: Option<Params>,
        version: Option<&str>,
    ) -> Result<Value> {
        let query = resolve(nodes.into(), fields.into(), params);
        let response = self.get(&query.path, Some(query.params), version).await?;
        if query.unwrap {
            Ok(unwrap_data(response))
        } else {
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_node_single_field() {
        let query = resolve(NodeSpec::from("me"), FieldSpec::from("id"), None);
        assert_eq!(query.path, "me");
        assert_eq!(query.params["fields"], "id");
        assert!(!query.params.contains_key("ids"));
        assert!(query.unwrap);
    }

    #[test]
    fn test_single_node_many_fields() {
        let query = resolve(NodeSpec::from("me"), FieldSpec::from(&["id", "name"]), None);
        assert_eq!(query.path, "me");
        assert_eq!(query.params["fields"], "id,name");
        assert!(query.unwrap);
    }

    #[test]
    fn test_one_element_field_list_degrades() {
        let scalar = resolve(NodeSpec::from("me"), FieldSpec::from("id"), None);
        let list = resolve(NodeSpec::from("me"), FieldSpec::from(&["id"]), None);
        assert_eq!(scalar, list);
    }

    #[test]
    fn test_many_nodes_single_field() {
        let query = resolve(NodeSpec::from(&["1", "2"]), FieldSpec::from("id"), None);
        assert_eq!(query.path, "/");
        assert_eq!(query.params["ids"], "1,2");
        assert_eq!(query.params["fields"], "id");
        assert!(!query.unwrap);
    }

    #[test]
    fn test_many_nodes_many_fields() {
        let query = resolve(
            NodeSpec::from(&["1", "2"]),
            FieldSpec::from(&["id", "name"]),
            None,
        );
        assert_eq!(query.path, "/");
        assert_eq!(query.params["ids"], "1,2");
        assert_eq!(query.params["fields"], "id,name");
        assert!(!query.unwrap);
    }

    #[test]
    fn test_one_element_node_list_degrades_with_many_fields() {
        let query = resolve(NodeSpec::from(&["42"]), FieldSpec::from(&["id", "name"]), None);
        assert_eq!(query.path, "42");
        assert_eq!(query.params["fields"], "id,name");
        assert!(!query.params.contains_key("ids"));
        assert!(query.unwrap);
    }

    #[test]
    fn test_one_element_node_list_stays_on_root_with_single_field() {
        // a multi-node lookup never degrades on the node axis alone
        let query = resolve(NodeSpec::from(&["42"]), FieldSpec::from("id"), None);
        assert_eq!(query.path, "/");
        assert_eq!(query.params["ids"], "42");
        assert!(!query.unwrap);
    }

    #[test]
    fn test_one_element_both_lists_degrade_fully() {
        let query = resolve(NodeSpec::from(&["42"]), FieldSpec::from(&["id"]), None);
        assert_eq!(query.path, "42");
        assert_eq!(query.params["fields"], "id");
        assert!(!query.params.contains_key("ids"));
        assert!(query.unwrap);
    }

    #[test]
    fn test_caller_params_are_kept() {
        let mut params = Params::new();
        params.insert("type".to_string(), "large".to_string());
        let query = resolve(NodeSpec::from("me/picture"), FieldSpec::from("url"), Some(params));
        assert_eq!(query.params["type"], "large");
        assert_eq!(query.params["fields"], "url");
    }

    #[test]
    fn test_unwrap_data() {
        let unwrapped = unwrap_data(json!({"data": [{"id": "1"}]}));
        assert_eq!(unwrapped, json!([{"id": "1"}]));

        let passthrough = unwrap_data(json!({"id": "1"}));
        assert_eq!(passthrough, json!({"id": "1"}));

        let non_object = unwrap_data(json!(["a"]));
        assert_eq!(non_object, json!(["a"]));
    }
}
