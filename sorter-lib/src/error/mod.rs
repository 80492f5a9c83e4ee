//! Error types

mod config;
mod editor;
mod gateway;

pub use config::*;
pub use editor::*;
pub use gateway::*;
