//! # keel
//!
//! Portfolio analytics engine: the compute core behind a project
//! portfolio management dashboard. Two calculation units - the schedule
//! risk Monte Carlo simulator and the dependency network layout engine -
//! operate as pure functions over the in-memory [`PortfolioStore`], and
//! the [`views`] module dispatches dashboard view ids to them through an
//! exhaustive enum match.

#![forbid(unsafe_code)]

pub mod views;

pub use keel_core::{Error, Result};
pub use keel_diagram::{
    CyclePolicy, DependencyGraph, DiagramError, LayoutConfig, NetworkLayout, Viewport,
    layout_network,
};
pub use keel_model::{
    Action, Dependency, DependencyKind, PortfolioStore, ProbabilityBand, Risk, RiskId,
    RiskStatus, Task, TaskId, TaskKind, TaskStatus,
};
pub use keel_risk::{ScheduleRiskSimulator, SimulationConfig, SimulationReport};
pub use views::{ViewError, ViewId, ViewModel, ViewSummary, render};
