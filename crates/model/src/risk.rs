//! Risk register types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a risk record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(String);

impl RiskId {
    /// Create a risk ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RiskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RiskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RiskId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Qualitative probability band for a risk.
///
/// Each band maps to a fixed numeric trigger probability used by the
/// schedule risk simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbabilityBand {
    High,
    Medium,
    Low,
}

impl ProbabilityBand {
    /// The per-iteration trigger probability for this band.
    pub fn trigger_threshold(self) -> f64 {
        match self {
            Self::High => 0.7,
            Self::Medium => 0.4,
            Self::Low => 0.1,
        }
    }
}

/// Whether a risk is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStatus {
    Open,
    Closed,
}

/// A risk register entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    /// Unique risk identifier.
    pub id: RiskId,
    /// Human-readable name.
    pub name: String,
    /// Qualitative probability band.
    pub probability: ProbabilityBand,
    /// Impact score; the simulator converts score into schedule days.
    pub score: f64,
    /// Open or closed.
    pub status: RiskStatus,
}

impl Risk {
    /// Whether this risk participates in schedule risk simulation.
    pub fn is_open(&self) -> bool {
        self.status == RiskStatus::Open
    }
}
