//! Graph indexing and topological layering.
//!
//! # Pipeline
//!
//! ```text
//! WorkflowGraph (nodes + edges, ids as strings)
//!        ↓  index::GraphIndex::build()
//! GraphIndex (dense arena indices, forward/reverse adjacency)
//!        ↓  layering::Layering::compute()
//! Layering (layer + column per node, forced-pick count)
//! ```
//!
//! Both stages are O(N + E) and deterministic for a given input order.
//! [`cycles`] offers strict cycle detection for callers that want it; the
//! pipeline itself tolerates cycles.

pub mod cycles;
pub mod index;
pub mod layering;

pub use cycles::{find_cycles, has_cycle};
pub use index::GraphIndex;
pub use layering::Layering;
