//! In-process gateway backed by a record store

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;

use super::FetchRequest;
use super::FetchResult;
use super::FieldLabels;
use super::PersistRequest;
use super::RemoteDataGateway;
use crate::config::split_specs;
use crate::error::GatewayError;
use crate::model::SourceRecord;
use crate::model::Value;

/// Records and labels of one child type.
#[derive(Debug, Clone, Default)]
pub struct ChildTable {
    label: String,
    field_labels: HashMap<String, String>,
    records: Vec<SourceRecord>,
}

impl ChildTable {
    /// Creates an empty table with the given display label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the label of a field spec. Unlabelled specs use the spec itself.
    pub fn field_label(mut self, spec: impl Into<String>, label: impl Into<String>) -> Self {
        self.field_labels.insert(spec.into(), label.into());
        self
    }

    /// Adds a record.
    pub fn record(mut self, record: SourceRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Returns the records in insertion order.
    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }
}

/// A gateway that serves and persists records held in memory.
///
/// Fetches filter by the parent link field and sort by the order field,
/// using the record id as a tiebreak. Persisting rewrites the order field of
/// each listed record to its 1-based position. Failures can be queued for
/// the next fetch or persist.
///
/// # Example
///
/// ```
/// use sorter_lib::gateway::{ChildTable, InMemoryGateway};
/// use sorter_lib::model::SourceRecord;
///
/// let gateway = InMemoryGateway::new().with_table(
///     "Line_Item__c",
///     ChildTable::new("Line Item")
///         .field_label("Name", "Item Name")
///         .record(SourceRecord::with_id("a1").set("Quote__c", "q1").set("Name", "Bolt")),
/// );
/// assert_eq!(gateway.fetch_calls(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    tables: RwLock<HashMap<String, ChildTable>>,
    next_fetch_error: Mutex<Option<GatewayError>>,
    next_persist_error: Mutex<Option<GatewayError>>,
    latency: Option<Duration>,
    fetch_calls: AtomicUsize,
    persist_calls: AtomicUsize,
}

impl InMemoryGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a child type.
    pub fn with_table(self, child_type_name: impl Into<String>, table: ChildTable) -> Self {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(child_type_name.into(), table);
        self
    }

    /// Delays every call by the given duration.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes the next fetch fail with the given error.
    pub fn fail_next_fetch(&self, error: GatewayError) {
        *self.next_fetch_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Makes the next persist fail with the given error.
    pub fn fail_next_persist(&self, error: GatewayError) {
        *self.next_persist_error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Returns the number of fetch calls received.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Returns the number of persist calls received.
    pub fn persist_calls(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }

    /// Returns a copy of the stored records of a child type.
    pub fn records(&self, child_type_name: &str) -> Vec<SourceRecord> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(child_type_name)
            .map(|t| t.records.clone())
            .unwrap_or_default()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn take_error(slot: &Mutex<Option<GatewayError>>) -> Option<GatewayError> {
        slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

fn unknown_type(child_type_name: &str) -> GatewayError {
    GatewayError::rejected(format!("unknown child type: {child_type_name}"))
}

#[async_trait]
impl RemoteDataGateway for InMemoryGateway {
    async fn fetch_ordered_records(&self, request: &FetchRequest) -> Result<FetchResult, GatewayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if let Some(error) = Self::take_error(&self.next_fetch_error) {
            return Err(error);
        }

        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let table = tables
            .get(&request.child_type_name)
            .ok_or_else(|| unknown_type(&request.child_type_name))?;

        let mut records: Vec<SourceRecord> = table
            .records
            .iter()
            .filter(|r| r.resolve(&request.parent_link_field_name).display() == request.parent_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.resolve(&request.order_field_name)
                .cmp_for_sort(&b.resolve(&request.order_field_name))
                .then_with(|| a.id().cmp(&b.id()))
        });

        let field_labels: FieldLabels = split_specs(&request.display_fields_csv)
            .into_iter()
            .map(|spec| {
                let label = table.field_labels.get(spec).map_or(spec, String::as_str);
                (spec, label)
            })
            .collect();

        log::debug!(
            "InMemoryGateway: fetched {} {} records for parent {}",
            records.len(),
            request.child_type_name,
            request.parent_id
        );

        Ok(FetchResult {
            object_label: table.label.clone(),
            field_labels,
            records,
        })
    }

    async fn persist_order(&self, request: &PersistRequest) -> Result<(), GatewayError> {
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if let Some(error) = Self::take_error(&self.next_persist_error) {
            return Err(error);
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let table = tables
            .get_mut(&request.child_type_name)
            .ok_or_else(|| unknown_type(&request.child_type_name))?;

        let mut positions = Vec::with_capacity(request.ordered_ids.len());
        for id in &request.ordered_ids {
            let position = table
                .records
                .iter()
                .position(|r| r.id() == Some(id))
                .ok_or_else(|| GatewayError::rejected(format!("record not found: {id}")))?;
            positions.push(position);
        }

        for (order, position) in positions.into_iter().enumerate() {
            let order = i64::try_from(order + 1).unwrap_or(i64::MAX);
            table.records[position].insert(request.order_field_name.clone(), Value::Int(order));
        }

        log::debug!(
            "InMemoryGateway: persisted order of {} {} records",
            request.ordered_ids.len(),
            request.child_type_name
        );
        Ok(())
    }
}
