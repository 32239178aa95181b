/// A document snapshot: field name to JSON value, as stored by the event source.
pub type Document = serde_json::Map<String, serde_json::Value>;
