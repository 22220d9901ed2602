#![forbid(unsafe_code)]
//! flowdag-core library.
//!
//! Shared types for the flowdag layout engine: the workflow graph model
//! consumed from the host application, the layout parameters, and the
//! error types used at the crate boundaries.
//!
//! # Conventions
//!
//! - **Errors**: Typed errors via `thiserror` at library boundaries,
//!   `anyhow::Result` for file-loading entry points.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;

pub use config::{LayoutAlgorithm, LayoutParams, MAX_DIMENSION, Orientation, load_layout_params};
pub use error::{ConfigError, ModelError};
pub use model::{
    ConditionType, Edge, EdgeStyle, Node, NodeMetadata, NodeStatus, NodeType, WorkflowGraph,
};
