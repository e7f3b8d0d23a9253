//! JSON schemas and catalog entries for discovery.

use partnertap_types::Transaction;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::StreamName;

/// One stream as advertised in the discovery catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Stream identifier.
    pub tap_stream_id: &'static str,
    /// Stream name.
    pub stream: &'static str,
    /// Fields that identify a record.
    pub key_properties: &'static [&'static str],
    /// Field holding the replication position.
    pub replication_key: &'static str,
    /// JSON schema of one record.
    pub schema: Value,
}

impl CatalogEntry {
    /// Builds the catalog entry for `stream`.
    #[must_use]
    pub fn for_stream(stream: StreamName) -> Self {
        Self {
            tap_stream_id: stream.as_str(),
            stream: stream.as_str(),
            key_properties: stream.key_properties(),
            replication_key: "day",
            schema: stream.schema(),
        }
    }
}

/// Discovery catalog listing every supported stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    /// Catalog entries.
    pub streams: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds the catalog for all registered streams.
    #[must_use]
    pub fn discover() -> Self {
        Self {
            streams: StreamName::all()
                .iter()
                .copied()
                .map(CatalogEntry::for_stream)
                .collect(),
        }
    }
}

pub(crate) fn transaction_schema() -> Value {
    let properties: Map<String, Value> = Transaction::field_names()
        .iter()
        .map(|name| {
            let schema = match *name {
                "day" => json!({ "type": ["string"], "format": "date" }),
                "created_at" => json!({ "type": ["null", "string"], "format": "date-time" }),
                _ => json!({ "type": ["null", "string"] }),
            };
            ((*name).to_string(), schema)
        })
        .collect();

    json!({
        "type": ["null", "object"],
        "additionalProperties": false,
        "properties": properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_schema_covers_fields() {
        let schema = transaction_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(properties.len(), Transaction::field_names().len());
        assert_eq!(properties["day"]["type"], json!(["string"]));
        assert_eq!(properties["net_amount"]["type"], json!(["null", "string"]));
    }

    #[test]
    fn test_catalog_discover() {
        let catalog = Catalog::discover();
        assert_eq!(catalog.streams.len(), StreamName::all().len());

        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value["streams"][0]["tap_stream_id"], "transactions");
        assert_eq!(value["streams"][0]["key_properties"], json!(["id", "day"]));
    }
}
