//! Configuration error types

/// A required editor input was not supplied by the host.
///
/// These are detected locally, before any remote call is made, and are
/// never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The parent record id is missing.
    #[error("failed to determine the parent record id")]
    MissingParentId,

    /// The child object type name is missing.
    #[error("child_type_name is not specified")]
    MissingChildType,

    /// The field linking child records to the parent is missing.
    #[error("parent_link_field_name is not specified")]
    MissingParentLinkField,

    /// The field holding the sort order is missing.
    #[error("order_field_name is not specified")]
    MissingOrderField,

    /// No display fields were configured.
    #[error("display_fields_csv is not specified")]
    MissingDisplayFields,
}

impl ConfigError {
    /// Returns the name of the configuration input this error refers to.
    pub fn input_name(&self) -> &'static str {
        match self {
            Self::MissingParentId => "parent_id",
            Self::MissingChildType => "child_type_name",
            Self::MissingParentLinkField => "parent_link_field_name",
            Self::MissingOrderField => "order_field_name",
            Self::MissingDisplayFields => "display_fields_csv",
        }
    }
}
