//! Reducer-style portfolio state container.
//!
//! [`PortfolioStore`] is an explicit, injectable state object rather than
//! an application-wide global. All mutation goes through
//! [`PortfolioStore::apply`] with a typed [`Action`], and read access
//! goes through slice accessors, so each consumer declares exactly which
//! slice of state it touches.

use keel_core::{Error, Result};

use crate::risk::{Risk, RiskId, RiskStatus};
use crate::task::{Task, TaskId, TaskStatus};

/// Reducer actions accepted by [`PortfolioStore::apply`].
#[derive(Debug, Clone)]
pub enum Action {
    /// Insert a task, or replace the task with the same id.
    UpsertTask(Task),
    /// Remove a task by id.
    RemoveTask(TaskId),
    /// Set a task's percent complete (0-100).
    SetTaskProgress { id: TaskId, progress: u8 },
    /// Set a task's lifecycle status.
    SetTaskStatus { id: TaskId, status: TaskStatus },
    /// Insert a risk, or replace the risk with the same id.
    UpsertRisk(Risk),
    /// Mark a risk as closed.
    CloseRisk(RiskId),
    /// Remove a risk by id.
    RemoveRisk(RiskId),
}

/// In-memory portfolio state: the task schedule slice and the risk
/// register slice.
///
/// Insertion order is preserved; the layout engine relies on it for
/// stable row ordering within a diagram column.
#[derive(Debug, Clone, Default)]
pub struct PortfolioStore {
    tasks: Vec<Task>,
    risks: Vec<Risk>,
}

impl PortfolioStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing records.
    pub fn with_data(tasks: Vec<Task>, risks: Vec<Risk>) -> Self {
        Self { tasks, risks }
    }

    /// The task schedule slice.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The risk register slice.
    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    /// Look up a task by id.
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Look up a risk by id.
    pub fn risk(&self, id: &RiskId) -> Option<&Risk> {
        self.risks.iter().find(|r| &r.id == id)
    }

    /// Risks currently open.
    pub fn open_risks(&self) -> impl Iterator<Item = &Risk> {
        self.risks.iter().filter(|r| r.is_open())
    }

    /// Apply a reducer action, validating before mutating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the targeted record does not
    /// exist and [`Error::OutOfRange`] for progress values above 100.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::UpsertTask(task) => {
                tracing::debug!(task = %task.id, "upserting task");
                match self.tasks.iter_mut().find(|t| t.id == task.id) {
                    Some(existing) => *existing = task,
                    None => self.tasks.push(task),
                }
                Ok(())
            }
            Action::RemoveTask(id) => {
                let before = self.tasks.len();
                self.tasks.retain(|t| t.id != id);
                if self.tasks.len() == before {
                    return Err(Error::not_found("task", id.as_str()));
                }
                Ok(())
            }
            Action::SetTaskProgress { id, progress } => {
                if progress > 100 {
                    return Err(Error::out_of_range(
                        "progress",
                        f64::from(progress),
                        0.0,
                        100.0,
                    ));
                }
                let task = self.task_mut(&id)?;
                task.progress = progress;
                Ok(())
            }
            Action::SetTaskStatus { id, status } => {
                let task = self.task_mut(&id)?;
                task.status = status;
                Ok(())
            }
            Action::UpsertRisk(risk) => {
                tracing::debug!(risk = %risk.id, "upserting risk");
                match self.risks.iter_mut().find(|r| r.id == risk.id) {
                    Some(existing) => *existing = risk,
                    None => self.risks.push(risk),
                }
                Ok(())
            }
            Action::CloseRisk(id) => {
                let risk = self
                    .risks
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or_else(|| Error::not_found("risk", id.as_str()))?;
                risk.status = RiskStatus::Closed;
                Ok(())
            }
            Action::RemoveRisk(id) => {
                let before = self.risks.len();
                self.risks.retain(|r| r.id != id);
                if self.risks.len() == before {
                    return Err(Error::not_found("risk", id.as_str()));
                }
                Ok(())
            }
        }
    }

    fn task_mut(&mut self, id: &TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| Error::not_found("task", id.as_str()))
    }
}
