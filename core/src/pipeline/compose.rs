// stepchain/src/pipeline/compose.rs

//! Embedding a pipeline as a single step of another pipeline.

use crate::core::control::StepResult;
use crate::core::step::{Next, Step};
use crate::pipeline::definition::Pipeline;
use std::fmt;
use tracing::{event, Level};

/// A `Pipeline` wrapped so it can sit in another pipeline's step list.
///
/// Running the wrapper runs the inner steps in place, as if they had been
/// spliced into the enclosing chain at this position. The inner pipeline keeps
/// its own cancellation signal and callbacks:
/// - its signal is polled before every inner step and once more before
///   control returns to the enclosing chain;
/// - its success callback fires right before the enclosing continuation runs;
/// - its callbacks still fire at most once, however many times the wrapper is
///   invoked.
///
/// Once the inner pipeline has completed, further invocations run no inner step
/// and pass the value straight on to the enclosing continuation.
pub struct PipelineStep<T, E> {
  pipeline: Pipeline<T, E>,
}

impl<T, E> PipelineStep<T, E> {
  pub fn new(pipeline: Pipeline<T, E>) -> Self {
    PipelineStep { pipeline }
  }

  pub fn pipeline(&self) -> &Pipeline<T, E> {
    &self.pipeline
  }

  pub fn into_inner(self) -> Pipeline<T, E> {
    self.pipeline
  }
}

impl<T, E> Pipeline<T, E> {
  /// Exposes this pipeline as a step of another pipeline. See `PipelineStep`.
  pub fn as_step(self) -> PipelineStep<T, E> {
    PipelineStep::new(self)
  }
}

impl<T, E> Step<T, E> for PipelineStep<T, E>
where
  T: Clone,
  E: fmt::Display,
{
  fn call(&self, value: T, next: Next<'_, T, E>) -> StepResult<E> {
    event!(
      Level::DEBUG,
      inner_total = self.pipeline.len(),
      inner_cursor = ?self.pipeline.cursor(),
      "Entering nested pipeline."
    );
    self.pipeline.advance(value, Some(Box::new(next)))
  }
}

impl<T, E> fmt::Debug for PipelineStep<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("PipelineStep").field(&self.pipeline).finish()
  }
}
