//! Remote data gateway
//!
//! Provides the `RemoteDataGateway` trait the editor reads and writes
//! through, its request/response types, and two implementations: an
//! in-process store and a JSON-over-HTTP client.

mod http;
mod labels;
mod memory;

pub use http::*;
pub use labels::*;
pub use memory::*;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::error::GatewayError;
use crate::model::RecordId;
use crate::model::SourceRecord;

/// Parameters for fetching the ordered children of a parent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    /// Type name of the child records.
    pub child_type_name: String,
    /// Id of the parent record.
    pub parent_id: String,
    /// Child field referencing the parent.
    pub parent_link_field_name: String,
    /// Child field holding the sort order.
    pub order_field_name: String,
    /// Comma-separated display field specs.
    pub display_fields_csv: String,
}

/// Result of a fetch.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    /// Display label of the child type.
    #[serde(default)]
    pub object_label: String,
    /// Field labels, in display order.
    #[serde(default)]
    pub field_labels: FieldLabels,
    /// Records, in sort order.
    #[serde(default)]
    pub records: Vec<SourceRecord>,
}

/// Parameters for persisting a new row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistRequest {
    /// Record ids in their new order.
    pub ordered_ids: Vec<RecordId>,
    /// Child field holding the sort order.
    pub order_field_name: String,
    /// Type name of the child records.
    pub child_type_name: String,
}

/// Trait for the remote side backing the editor.
///
/// Implementations own both reads and writes; the editor never assumes its
/// local order is durable until a fetch after `persist_order` confirms it.
///
/// # Example
///
/// ```ignore
/// use sorter_lib::gateway::{InMemoryGateway, RemoteDataGateway};
///
/// let gateway = InMemoryGateway::new();
/// let result = gateway.fetch_ordered_records(&request).await?;
/// for record in &result.records {
///     println!("{:?}", record.id());
/// }
/// ```
#[async_trait]
pub trait RemoteDataGateway: Send + Sync {
    /// Fetches the children of a parent, ordered by the order field.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the remote call fails.
    async fn fetch_ordered_records(&self, request: &FetchRequest) -> Result<FetchResult, GatewayError>;

    /// Writes the given order back to the source.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the remote call fails.
    async fn persist_order(&self, request: &PersistRequest) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_result_keeps_label_order() {
        let json = r#"{
            "objectLabel": "Line Item",
            "fieldLabels": {"Zeta__c": "Zeta", "Name": "Item Name", "Amount__c": "Amount"},
            "records": [{"Id": "a1", "Name": "Bolt"}]
        }"#;
        let result: FetchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.object_label, "Line Item");
        let keys: Vec<&str> = result.field_labels.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["Zeta__c", "Name", "Amount__c"]);
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_persist_request_wire_shape() {
        let request = PersistRequest {
            ordered_ids: vec![RecordId::from("a2"), RecordId::from("a1")],
            order_field_name: "Sort_Order__c".into(),
            child_type_name: "Line_Item__c".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "orderedIds": ["a2", "a1"],
                "orderFieldName": "Sort_Order__c",
                "childTypeName": "Line_Item__c"
            })
        );
    }
}
