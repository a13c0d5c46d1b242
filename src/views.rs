//! Enum-keyed view dispatch.
//!
//! View ids form a closed enum and [`render`] is an exhaustive match:
//! adding a view without wiring a handler is a compile error, and unknown
//! id strings fail at the parse boundary instead of deep inside a
//! renderer.
//!
//! Only the two analytic views carry real computation. The remaining
//! dashboard modules render as slice summaries - their screens are
//! presentational and out of scope for the engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use keel_diagram::{CyclePolicy, DiagramError, LayoutConfig, NetworkLayout, layout_network};
use keel_model::PortfolioStore;
use keel_risk::{ScheduleRiskSimulator, SimulationConfig, SimulationReport};

/// Identifier for a dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    RiskSimulation,
    NetworkDiagram,
    CostOverview,
    ScopeOverview,
    ScheduleOverview,
    ResourceOverview,
    StakeholderOverview,
    ProcurementOverview,
    QualityOverview,
    IntegrationOverview,
}

impl ViewId {
    /// The stable string id used by navigation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RiskSimulation => "risk-simulation",
            Self::NetworkDiagram => "network-diagram",
            Self::CostOverview => "cost-overview",
            Self::ScopeOverview => "scope-overview",
            Self::ScheduleOverview => "schedule-overview",
            Self::ResourceOverview => "resource-overview",
            Self::StakeholderOverview => "stakeholder-overview",
            Self::ProcurementOverview => "procurement-overview",
            Self::QualityOverview => "quality-overview",
            Self::IntegrationOverview => "integration-overview",
        }
    }

    /// All known views, in navigation order.
    pub fn all() -> &'static [ViewId] {
        &[
            Self::RiskSimulation,
            Self::NetworkDiagram,
            Self::CostOverview,
            Self::ScopeOverview,
            Self::ScheduleOverview,
            Self::ResourceOverview,
            Self::StakeholderOverview,
            Self::ProcurementOverview,
            Self::QualityOverview,
            Self::IntegrationOverview,
        ]
    }
}

impl FromStr for ViewId {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|v| v.as_str() == s)
            .copied()
            .ok_or_else(|| ViewError::UnknownView(s.to_string()))
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors surfaced by view rendering.
#[derive(Debug, Clone, Error)]
pub enum ViewError {
    #[error("unknown view id: {0}")]
    UnknownView(String),

    #[error(transparent)]
    Diagram(#[from] DiagramError),
}

/// Headline counts for a presentational view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub view: ViewId,
    pub task_count: usize,
    pub open_risk_count: usize,
}

/// Data handed to the rendering layer for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewModel {
    RiskSimulation(SimulationReport),
    NetworkDiagram(NetworkLayout),
    Summary(ViewSummary),
}

/// Render a view against the portfolio store.
///
/// The risk simulation view reads the task and risk slices; the network
/// diagram view reads only the task slice; every other view reads
/// headline counts.
///
/// # Errors
///
/// Returns [`ViewError::Diagram`] when the network diagram view meets
/// invalid or cyclic dependency data.
pub fn render(view: ViewId, store: &PortfolioStore) -> Result<ViewModel, ViewError> {
    tracing::debug!(view = %view, "rendering view");
    match view {
        ViewId::RiskSimulation => {
            let sim = ScheduleRiskSimulator::new(SimulationConfig::default());
            let risks: Vec<_> = store.open_risks().cloned().collect();
            Ok(ViewModel::RiskSimulation(sim.run(store.tasks(), &risks)))
        }
        ViewId::NetworkDiagram => {
            let layout =
                layout_network(store.tasks(), &LayoutConfig::default(), CyclePolicy::Reject)?;
            Ok(ViewModel::NetworkDiagram(layout))
        }
        ViewId::CostOverview
        | ViewId::ScopeOverview
        | ViewId::ScheduleOverview
        | ViewId::ResourceOverview
        | ViewId::StakeholderOverview
        | ViewId::ProcurementOverview
        | ViewId::QualityOverview
        | ViewId::IntegrationOverview => Ok(ViewModel::Summary(ViewSummary {
            view,
            task_count: store.tasks().len(),
            open_risk_count: store.open_risks().count(),
        })),
    }
}
