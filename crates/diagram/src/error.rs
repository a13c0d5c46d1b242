//! Diagram-specific error types.

use keel_model::TaskId;
use thiserror::Error;

/// Errors raised while building or laying out a dependency graph.
#[derive(Debug, Clone, Error)]
pub enum DiagramError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("duplicate task id: {0}")]
    DuplicateTask(TaskId),

    #[error("unknown predecessor '{predecessor}' referenced by task '{task}'")]
    UnknownPredecessor { task: TaskId, predecessor: TaskId },

    #[error("task '{0}' depends on itself")]
    SelfDependency(TaskId),

    #[error("duplicate dependency: {predecessor} -> {task}")]
    DuplicateDependency { task: TaskId, predecessor: TaskId },

    #[error("dependency cycle involving tasks: {0:?}")]
    CycleDetected(Vec<TaskId>),
}

impl DiagramError {
    pub fn unknown_predecessor(task: impl Into<TaskId>, predecessor: impl Into<TaskId>) -> Self {
        Self::UnknownPredecessor {
            task: task.into(),
            predecessor: predecessor.into(),
        }
    }

    pub fn duplicate_dependency(task: impl Into<TaskId>, predecessor: impl Into<TaskId>) -> Self {
        Self::DuplicateDependency {
            task: task.into(),
            predecessor: predecessor.into(),
        }
    }
}

/// Result type for diagram operations.
pub type DiagramResult<T> = std::result::Result<T, DiagramError>;
