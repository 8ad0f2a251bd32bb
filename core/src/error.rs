// stepchain/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    /// The shared cancellation signal was observed before a pending step.
    #[error("Pipeline aborted: cancellation observed before a pending step")]
    Aborted,

    /// A step returned without calling its continuation.
    #[error("Pipeline stopped by a step before reaching its last step")]
    Stopped,

    #[error("Cannot append a step: pipeline of {total} step(s) has already started running")]
    AlreadyStarted { total: usize },

    #[error("Step failed. Source: {source}")]
    Step {
        #[source]
        source: AnyhowError,
    },

    #[error("Internal stepchain error: {0}")]
    Internal(String),
}

// Opaque failures from step bodies land in FlowError::Step.
impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<FlowError>() {
      Ok(flow_err) => flow_err,
      Err(other) => FlowError::Step { source: other },
    }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;
