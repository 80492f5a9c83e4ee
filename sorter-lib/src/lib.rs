//! Reorderable child-record list editor
//!
//! A headless editor for hosts that show a parent record's children as a
//! table: fetch the children through a [`gateway::RemoteDataGateway`],
//! resize columns, drag rows into a new order and persist it.

pub mod config;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod model;
pub mod notify;

mod state;

pub use config::EditorConfig;
pub use editor::EditorState;
pub use editor::EventResult;
pub use editor::ListEditor;
pub use editor::View;
pub use state::Store;
