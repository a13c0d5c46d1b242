//! Schedule risk Monte Carlo simulator.
//!
//! Each trial sums one PERT sample per critical task, then rolls every
//! open risk against its band threshold and adds weighted impact days for
//! each trigger. The rounded trial totals form the empirical distribution
//! reported as percentiles and a histogram.

use keel_model::{Risk, Task};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::pert::pert_sample;

/// Tuning knobs for a simulation run.
///
/// The PERT shape factors, risk impact weight, and band thresholds are
/// fixed modeling constants; they live here as documented defaults
/// rather than inline literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent trials.
    pub iterations: usize,
    /// Optimistic duration = `optimistic_factor` x planned duration.
    pub optimistic_factor: f64,
    /// Pessimistic duration = `pessimistic_factor` x planned duration.
    pub pessimistic_factor: f64,
    /// Days added per triggered risk = `risk_impact_weight` x risk score.
    pub risk_impact_weight: f64,
    /// Histogram resolution.
    pub histogram_buckets: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            optimistic_factor: 0.9,
            pessimistic_factor: 1.25,
            risk_impact_weight: 0.5,
            histogram_buckets: 20,
        }
    }
}

/// One histogram bucket of the simulated duration distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Inclusive lower edge in days.
    pub lower: f64,
    /// Upper edge in days (inclusive for the final bucket).
    pub upper: f64,
    /// Number of trials that landed in this bucket.
    pub frequency: usize,
    /// Running share of trials at or below this bucket, 0-100.
    pub cumulative_pct: f64,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Trials performed.
    pub iterations: usize,
    /// 50th percentile duration in days.
    pub p50: i64,
    /// 80th percentile duration in days.
    pub p80: i64,
    /// 90th percentile duration in days.
    pub p90: i64,
    /// Shortest simulated duration.
    pub min: i64,
    /// Longest simulated duration.
    pub max: i64,
    /// Plain sum of critical-task planned durations, with no uncertainty.
    pub deterministic_baseline: f64,
    /// Bucketed distribution for charting.
    pub histogram: Vec<HistogramBucket>,
    /// All trial durations, sorted ascending.
    pub samples: Vec<i64>,
}

impl SimulationReport {
    /// Report for a zero-trial run.
    fn empty(deterministic_baseline: f64) -> Self {
        Self {
            iterations: 0,
            p50: 0,
            p80: 0,
            p90: 0,
            min: 0,
            max: 0,
            deterministic_baseline,
            histogram: Vec::new(),
            samples: Vec::new(),
        }
    }
}

/// Monte Carlo simulator over a task schedule and risk register.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRiskSimulator {
    config: SimulationConfig,
}

impl ScheduleRiskSimulator {
    /// Create a simulator with the given configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the simulation with an entropy-seeded generator.
    ///
    /// Repeated calls yield different distributions; use
    /// [`Self::run_with_rng`] with a seeded generator for reproducible
    /// runs.
    pub fn run(&self, tasks: &[Task], risks: &[Risk]) -> SimulationReport {
        let mut rng = StdRng::from_entropy();
        self.run_with_rng(tasks, risks, &mut rng)
    }

    /// Run the simulation drawing randomness from `rng`.
    ///
    /// Zero configured iterations, or an input with no critical tasks and
    /// no open risks, degrade to degenerate reports rather than errors.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        tasks: &[Task],
        risks: &[Risk],
        rng: &mut R,
    ) -> SimulationReport {
        let critical: Vec<&Task> = tasks.iter().filter(|t| t.is_schedule_critical()).collect();
        let open: Vec<&Risk> = risks.iter().filter(|r| r.is_open()).collect();
        let baseline: f64 = critical.iter().map(|t| t.duration_days).sum();

        tracing::debug!(
            critical_tasks = critical.len(),
            open_risks = open.len(),
            iterations = self.config.iterations,
            "starting schedule risk simulation"
        );

        if self.config.iterations == 0 {
            return SimulationReport::empty(baseline);
        }

        let mut samples: Vec<i64> = (0..self.config.iterations)
            .map(|_| self.simulate_trial(&critical, &open, rng))
            .collect();
        samples.sort_unstable();

        let n = samples.len();
        let percentile = |p: f64| -> i64 {
            let idx = ((n as f64 * p) as usize).min(n - 1);
            samples[idx]
        };

        let report = SimulationReport {
            iterations: n,
            p50: percentile(0.5),
            p80: percentile(0.8),
            p90: percentile(0.9),
            min: samples[0],
            max: samples[n - 1],
            deterministic_baseline: baseline,
            histogram: build_histogram(&samples, self.config.histogram_buckets),
            samples,
        };

        tracing::info!(
            p50 = report.p50,
            p80 = report.p80,
            p90 = report.p90,
            "schedule risk simulation complete"
        );

        report
    }

    /// One independent trial: PERT-sampled task durations plus triggered
    /// risk impacts, rounded to whole days.
    fn simulate_trial<R: Rng + ?Sized>(
        &self,
        critical: &[&Task],
        open: &[&Risk],
        rng: &mut R,
    ) -> i64 {
        let mut total: f64 = critical
            .iter()
            .map(|task| {
                let likely = task.duration_days;
                let min = likely * self.config.optimistic_factor;
                let max = likely * self.config.pessimistic_factor;
                pert_sample(rng, min, likely, max)
            })
            .sum();

        for risk in open {
            let u: f64 = rng.gen_range(0.0..1.0);
            if u < risk.probability.trigger_threshold() {
                total += risk.score * self.config.risk_impact_weight;
            }
        }

        total.round() as i64
    }
}

/// Bucket sorted samples into a fixed-resolution histogram spanning
/// `[min, max]`, with running cumulative percentages.
///
/// Every sample lands in exactly one bucket; the final bucket owns the
/// upper edge, so frequencies always sum to the trial count and the last
/// cumulative percentage is 100.
fn build_histogram(sorted: &[i64], buckets: usize) -> Vec<HistogramBucket> {
    let n = sorted.len();
    if n == 0 || buckets == 0 {
        return Vec::new();
    }

    let min = sorted[0] as f64;
    let max = sorted[n - 1] as f64;
    let span = max - min;

    // All trials identical: one bucket carries the whole distribution.
    if span <= 0.0 {
        return vec![HistogramBucket {
            lower: min,
            upper: max,
            frequency: n,
            cumulative_pct: 100.0,
        }];
    }

    let width = span / buckets as f64;
    let mut frequencies = vec![0usize; buckets];
    for &sample in sorted {
        let idx = (((sample as f64 - min) / width) as usize).min(buckets - 1);
        frequencies[idx] += 1;
    }

    let mut seen = 0usize;
    frequencies
        .iter()
        .enumerate()
        .map(|(i, &frequency)| {
            seen += frequency;
            HistogramBucket {
                lower: min + i as f64 * width,
                upper: min + (i as f64 + 1.0) * width,
                frequency,
                cumulative_pct: seen as f64 / n as f64 * 100.0,
            }
        })
        .collect()
}
