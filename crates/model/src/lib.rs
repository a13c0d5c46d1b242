//! # keel-model
//!
//! Portfolio domain model: tasks with dependency edges, risk records, and
//! the [`PortfolioStore`] state container. The store is an explicit,
//! injectable object - callers pass it by reference and mutate it only
//! through reducer-style [`Action`]s, so every consumer declares exactly
//! which slice of state it reads or writes.

#![forbid(unsafe_code)]

pub mod risk;
pub mod store;
pub mod task;

pub use risk::{ProbabilityBand, Risk, RiskId, RiskStatus};
pub use store::{Action, PortfolioStore};
pub use task::{Dependency, DependencyKind, Task, TaskId, TaskKind, TaskStatus};
