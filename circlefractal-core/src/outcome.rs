use crate::{PixelBuffer, RenderError};
use serde::{Deserialize, Serialize};

/// Lifecycle of a render task. A task moves forward only:
/// `Ready -> Running -> {Succeeded, Cancelled, Failed}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    Ready,
    Running,
    Succeeded,
    Cancelled,
    Failed,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Succeeded | TaskState::Cancelled | TaskState::Failed
        )
    }
}

/// The single terminal notification of a render.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    Completed(PixelBuffer),
    Cancelled,
    Failed(RenderError),
}

impl RenderOutcome {
    /// The task state this outcome leaves the task in.
    pub fn state(&self) -> TaskState {
        match self {
            RenderOutcome::Completed(_) => TaskState::Succeeded,
            RenderOutcome::Cancelled => TaskState::Cancelled,
            RenderOutcome::Failed(_) => TaskState::Failed,
        }
    }

    pub fn image(&self) -> Option<&PixelBuffer> {
        match self {
            RenderOutcome::Completed(image) => Some(image),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<Option<PixelBuffer>, RenderError> {
        match self {
            RenderOutcome::Completed(image) => Ok(Some(image)),
            RenderOutcome::Cancelled => Ok(None),
            RenderOutcome::Failed(err) => Err(err),
        }
    }
}
