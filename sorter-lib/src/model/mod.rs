//! Data model types
//!
//! - [`SourceRecord`] and [`Value`]: records as delivered by the gateway
//! - [`ColumnModel`]: one displayed field with its current width
//! - [`RowModel`]: one child record as shown in the table

mod column;
mod record;
mod record_serde;
mod row;
mod value;

pub use column::*;
pub use record::*;
pub use row::*;
pub use value::*;
