// stepchain/src/core/control.rs

//! Defines the outcome of a pipeline run as seen by the caller (and by every
//! step that called its continuation).

use crate::error::{FlowError, FlowResult};

/// Outcome of driving a pipeline through `Pipeline::run` or `Next::run`.
///
/// Errors are not represented here; a failing step surfaces as the `Err`
/// side of `StepResult<E>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step called its continuation and the success terminal was reached.
  Completed,
  /// A step returned without calling its continuation.
  /// The remaining steps were never touched.
  Stopped,
  /// The cancellation signal was active when a pending step was about to start.
  Aborted,
}

impl PipelineResult {
  pub fn is_completed(self) -> bool {
    self == PipelineResult::Completed
  }

  /// Error-shaped view of the outcome, for callers that treat anything short
  /// of completion as a failure.
  pub fn into_flow_result(self) -> FlowResult<()> {
    match self {
      PipelineResult::Completed => Ok(()),
      PipelineResult::Stopped => Err(FlowError::Stopped),
      PipelineResult::Aborted => Err(FlowError::Aborted),
    }
  }
}

/// Result returned by steps and continuations.
pub type StepResult<E> = Result<PipelineResult, E>;
