//! dockyard - nested dockable-pane layout engine
//!
//! Panes (tab groups of host-owned content units) are arranged in split chains
//! inside anchor regions, floating windows and an auto-hide overlay. The engine
//! computes every rectangle, performs dock and merge operations, drives the
//! drag-to-redock protocol and saves/restores the whole arrangement.
//!
//! Hosts talk to the engine either through its methods or by sending `Msg`s
//! through `update::update`, and apply the `Cmd`s it returns.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod engine;
pub mod error;
pub mod messages;
pub mod model;
pub mod persist;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EngineConfig;
pub use engine::{DockEngine, DockRequest, DockStyle};
pub use error::DockError;
pub use messages::Msg;
pub use persist::{LayoutDocument, LoadReport};
