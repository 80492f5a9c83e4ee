//! Editor configuration

use serde::Deserialize;

use crate::error::ConfigError;
use crate::gateway::FetchRequest;
use crate::gateway::PersistRequest;
use crate::model::RecordId;

/// Inputs supplied by the host when the editor is mounted.
///
/// All five values are required before a load is attempted. The host's
/// property bag can be deserialized directly; both the host's own input
/// names (`recordId`, `childObjectApiName`, ...) and the descriptive names
/// are accepted.
///
/// # Example
///
/// ```
/// use sorter_lib::EditorConfig;
///
/// let config = EditorConfig::new()
///     .with_parent_id("a01000000000001")
///     .with_child_type_name("Line_Item__c")
///     .with_parent_link_field_name("Quote__c")
///     .with_order_field_name("Sort_Order__c")
///     .with_display_fields_csv("Name, Amount__c, Product__r.Name");
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.display_field_specs(), vec!["Name", "Amount__c", "Product__r.Name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Id of the parent record whose children are sorted.
    #[serde(alias = "recordId")]
    pub parent_id: Option<String>,

    /// Type name of the child records.
    #[serde(alias = "childObjectApiName")]
    pub child_type_name: Option<String>,

    /// Field on the child record that references the parent.
    #[serde(alias = "parentFieldApiName")]
    pub parent_link_field_name: Option<String>,

    /// Field on the child record that stores the sort order.
    #[serde(alias = "sortFieldApiName")]
    pub order_field_name: Option<String>,

    /// Comma-separated display fields, each a bare key or `relation.field`.
    #[serde(alias = "fieldsCsv")]
    pub display_fields_csv: Option<String>,
}

impl EditorConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parent record id.
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets the child type name.
    pub fn with_child_type_name(mut self, name: impl Into<String>) -> Self {
        self.child_type_name = Some(name.into());
        self
    }

    /// Sets the parent link field name.
    pub fn with_parent_link_field_name(mut self, name: impl Into<String>) -> Self {
        self.parent_link_field_name = Some(name.into());
        self
    }

    /// Sets the order field name.
    pub fn with_order_field_name(mut self, name: impl Into<String>) -> Self {
        self.order_field_name = Some(name.into());
        self
    }

    /// Sets the display fields.
    pub fn with_display_fields_csv(mut self, csv: impl Into<String>) -> Self {
        self.display_fields_csv = Some(csv.into());
        self
    }

    /// Checks that every required input is present, in input order.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] for the first missing input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        required(&self.parent_id, ConfigError::MissingParentId)?;
        required(&self.child_type_name, ConfigError::MissingChildType)?;
        required(&self.parent_link_field_name, ConfigError::MissingParentLinkField)?;
        required(&self.order_field_name, ConfigError::MissingOrderField)?;
        required(&self.display_fields_csv, ConfigError::MissingDisplayFields)?;
        if self.display_field_specs().is_empty() {
            return Err(ConfigError::MissingDisplayFields);
        }
        Ok(())
    }

    /// Returns the display field specs, trimmed, blank entries dropped.
    pub fn display_field_specs(&self) -> Vec<&str> {
        self.display_fields_csv
            .as_deref()
            .map(split_specs)
            .unwrap_or_default()
    }

    /// Returns the order field name, or an empty string if unset.
    pub fn order_field(&self) -> &str {
        self.order_field_name.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Builds the fetch request for this configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any input is missing.
    pub fn fetch_request(&self) -> Result<FetchRequest, ConfigError> {
        self.validate()?;
        Ok(FetchRequest {
            child_type_name: trimmed(&self.child_type_name),
            parent_id: trimmed(&self.parent_id),
            parent_link_field_name: trimmed(&self.parent_link_field_name),
            order_field_name: trimmed(&self.order_field_name),
            display_fields_csv: self.display_field_specs().join(","),
        })
    }

    /// Builds the persist request for the given row order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any input is missing.
    pub fn persist_request(&self, ordered_ids: Vec<RecordId>) -> Result<PersistRequest, ConfigError> {
        self.validate()?;
        Ok(PersistRequest {
            ordered_ids,
            order_field_name: trimmed(&self.order_field_name),
            child_type_name: trimmed(&self.child_type_name),
        })
    }
}

/// Splits a comma-separated field list.
pub fn split_specs(csv: &str) -> Vec<&str> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn required(value: &Option<String>, err: ConfigError) -> Result<(), ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(err),
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}
