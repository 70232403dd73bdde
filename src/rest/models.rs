//! Response envelopes of the tracker's REST interface.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A record of a collection, with keys in server order.
pub type Record = Map<String, Value>;

/// Successful collection response: `{data: {collection, @links}}`.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Envelope {
    pub data: CollectionData,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CollectionData {
    #[serde(default)]
    pub collection: Vec<Record>,
    #[serde(rename = "@links", default)]
    pub links: Links,
}

/// Navigation links supplied by the server alongside a page.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Links {
    #[serde(default)]
    pub prev: Vec<LinkRef>,
    #[serde(default)]
    pub next: Vec<LinkRef>,
    #[serde(rename = "self", default)]
    pub self_: Vec<LinkRef>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LinkRef {
    pub uri: String,
}

impl Links {
    pub fn prev_uri(&self) -> Option<&str> {
        self.prev.first().map(|link| link.uri.as_str())
    }

    pub fn next_uri(&self) -> Option<&str> {
        self.next.first().map(|link| link.uri.as_str())
    }

    pub fn self_uri(&self) -> Option<&str> {
        self.self_.first().map(|link| link.uri.as_str())
    }
}

/// Failed response body: `{error: {status, msg}}`.
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: String,
}

/// Render a JSON value as display text: strings as-is, null as empty.
///
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_links() {
        let envelope: Envelope = serde_json::from_value(json!({
            "data": {
                "collection": [{"id": "1", "name": "open"}],
                "@links": {
                    "self": [{"rel": "self", "uri": "http://t/demo/rest/data/status?@page_index=2"}],
                    "next": [{"rel": "next", "uri": "http://t/demo/rest/data/status?@page_index=3"}]
                }
            }
        }))
        .unwrap();
        assert_eq!(envelope.data.collection.len(), 1);
        assert_eq!(envelope.data.links.prev_uri(), None);
        assert!(envelope.data.links.next_uri().unwrap().ends_with("=3"));
        assert!(envelope.data.links.self_uri().unwrap().ends_with("=2"));
    }

    #[test]
    fn test_envelope_without_links() {
        let envelope: Envelope =
            serde_json::from_value(json!({"data": {"collection": []}})).unwrap();
        assert!(envelope.data.collection.is_empty());
        assert_eq!(envelope.data.links, Links::default());
    }

    #[test]
    fn test_record_preserves_key_order() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"data": {"collection": [{"link": "x", "id": "3", "username": "admin", "address": "a@b"}]}}"#,
        )
        .unwrap();
        let keys: Vec<&String> = envelope.data.collection[0].keys().collect();
        assert_eq!(keys, vec!["link", "id", "username", "address"]);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("open")), "open");
        assert_eq!(value_text(&json!(7)), "7");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(["1", "2"])), r#"["1","2"]"#);
    }
}
