//! # keel-diagram
//!
//! Layout engine for rendering a task dependency graph as a left-to-right
//! node-and-connector diagram. Nodes are assigned a discrete level (their
//! longest-path distance from a dependency-free root) with an iterative
//! Kahn traversal, columns are centered vertically, and each dependency
//! edge becomes a cubic bezier connector.
//!
//! Cyclic dependency data is detected and reported as a first-class
//! [`DiagramError::CycleDetected`] rather than silently truncated; callers
//! that prefer a best-effort rendering opt in through
//! [`CyclePolicy::BestEffort`].

#![forbid(unsafe_code)]

pub mod error;
pub mod graph;
pub mod layout;
pub mod viewport;

pub use error::{DiagramError, DiagramResult};
pub use graph::{CyclePolicy, DependencyGraph};
pub use layout::{
    ConnectorPath, GlyphKind, LayoutConfig, NetworkLayout, NodePlacement, layout_network,
};
pub use viewport::Viewport;
