//! # keel-risk
//!
//! Monte Carlo schedule risk simulation. Draws repeated independent trials
//! combining per-task duration uncertainty (a PERT-like three-point
//! distribution) with discrete risk-event uncertainty, and reports the
//! empirical completion-duration distribution as percentiles plus a
//! histogram.
//!
//! The random source is an injected seam: production callers get an
//! entropy-seeded generator through [`ScheduleRiskSimulator::run`], while
//! tests seed their own via [`ScheduleRiskSimulator::run_with_rng`] for
//! reproducible runs.

#![forbid(unsafe_code)]

pub mod pert;
pub mod simulator;

pub use pert::pert_sample;
pub use simulator::{
    HistogramBucket, ScheduleRiskSimulator, SimulationConfig, SimulationReport,
};
