//! Task and dependency types for the portfolio schedule model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tasks longer than this many days are treated as schedule-critical even
/// without an explicit critical-path flag.
pub const CRITICAL_DURATION_THRESHOLD_DAYS: f64 = 15.0;

/// Unique identifier for a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Create a task ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
}

/// Whether a node renders as a standard task bar or a milestone diamond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    Task,
    Milestone,
}

/// Dependency relationship types between tasks.
///
/// Only finish-to-start is exercised by the scheduling views; the other
/// variants are carried for data fidelity with imported schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
}

/// A directed dependency edge: `predecessor` must finish before the task
/// that owns this record can start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// The task that must complete first.
    pub predecessor: TaskId,
    /// Relationship type.
    pub kind: DependencyKind,
    /// Lag in days. Informational only - the layout engine never uses it
    /// to offset node positions.
    pub lag_days: f64,
}

impl Dependency {
    /// Create a finish-to-start dependency with zero lag.
    pub fn finish_to_start(predecessor: impl Into<TaskId>) -> Self {
        Self {
            predecessor: predecessor.into(),
            kind: DependencyKind::FinishToStart,
            lag_days: 0.0,
        }
    }
}

/// A schedule task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Human-readable name.
    pub name: String,
    /// Planned start date.
    pub start: NaiveDate,
    /// Planned finish date.
    pub finish: NaiveDate,
    /// Planned duration in days.
    pub duration_days: f64,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Percent complete, 0-100.
    pub progress: u8,
    /// Dependency edges pointing at predecessor tasks.
    pub dependencies: Vec<Dependency>,
    /// Explicitly flagged as lying on the critical path.
    pub critical: bool,
    /// Days this task can slip without delaying the project finish.
    pub total_float_days: f64,
    /// Render shape.
    pub kind: TaskKind,
}

impl Task {
    /// Whether this task participates in schedule risk simulation.
    ///
    /// A task counts as critical when flagged on the critical path, or
    /// heuristically when its duration exceeds
    /// [`CRITICAL_DURATION_THRESHOLD_DAYS`].
    pub fn is_schedule_critical(&self) -> bool {
        self.critical || self.duration_days > CRITICAL_DURATION_THRESHOLD_DAYS
    }

    /// Whether this node renders as a milestone diamond.
    pub fn is_milestone(&self) -> bool {
        self.kind == TaskKind::Milestone
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn task(duration: f64, critical: bool) -> Task {
        Task {
            id: TaskId::new("t-1"),
            name: "Design".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            finish: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            duration_days: duration,
            status: TaskStatus::NotStarted,
            progress: 0,
            dependencies: Vec::new(),
            critical,
            total_float_days: 0.0,
            kind: TaskKind::Task,
        }
    }

    #[test]
    fn flagged_task_is_critical() {
        assert!(task(5.0, true).is_schedule_critical());
    }

    #[test]
    fn long_task_is_critical_without_flag() {
        assert!(task(16.0, false).is_schedule_critical());
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!task(15.0, false).is_schedule_critical());
    }

    #[test]
    fn task_round_trips_through_json() {
        let mut t = task(10.0, false);
        t.dependencies.push(Dependency::finish_to_start("t-0"));

        let json = serde_json::to_string(&t).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
