// stepchain/src/core/step.rs

//! Defines the `Step<T, E>` contract and the `Next` continuation handed to
//! every step.

use crate::core::control::{PipelineResult, StepResult};
use crate::pipeline::definition::Pipeline;
use std::fmt;
use tracing::{event, Level};

/// One unit of work in a pipeline.
///
/// A step receives the current value and a continuation. It either:
/// - calls `next.run(value')` to hand a (possibly transformed) value to the
///   rest of the chain, returning whatever the rest of the chain returns;
/// - returns without calling it (`next.stop()` makes this explicit), leaving
///   the remaining steps untouched; or
/// - returns `Err(e)`, which propagates back to every pending caller.
///
/// Anything the step holds while `next.run` is executing (a lock guard, an
/// open handle) stays held until the whole remainder of the chain returns.
///
/// `Next` is consumed when called, so a step cannot invoke its continuation
/// twice. Building additional continuations to re-enter a pipeline is the
/// caller's responsibility and the resulting cursor movement is unspecified.
pub trait Step<T, E>: Send + Sync {
  fn call(&self, value: T, next: Next<'_, T, E>) -> StepResult<E>;
}

impl<T, E, F> Step<T, E> for F
where
  F: Fn(T, Next<'_, T, E>) -> StepResult<E> + Send + Sync,
{
  fn call(&self, value: T, next: Next<'_, T, E>) -> StepResult<E> {
    self(value, next)
  }
}

/// A type-erased step, as stored in a pipeline's step list.
pub struct BoxedStep<T, E>(Box<dyn Step<T, E>>);

impl<T, E> BoxedStep<T, E> {
  pub fn new(step: impl Step<T, E> + 'static) -> Self {
    BoxedStep(Box::new(step))
  }
}

impl<T, E> Step<T, E> for BoxedStep<T, E> {
  fn call(&self, value: T, next: Next<'_, T, E>) -> StepResult<E> {
    self.0.call(value, next)
  }
}

impl<T, E> fmt::Debug for BoxedStep<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("BoxedStep")
  }
}

/// Boxes a closure as a step.
///
/// Going through this function lets the compiler infer the closure's
/// higher-ranked signature from the expected `Fn` bound.
pub fn step_fn<T, E, F>(f: F) -> BoxedStep<T, E>
where
  F: Fn(T, Next<'_, T, E>) -> StepResult<E> + Send + Sync + 'static,
{
  BoxedStep::new(f)
}

/// The continuation: "run the pipeline one step further with this value".
pub struct Next<'a, T, E> {
  link: Link<'a, T, E>,
}

enum Link<'a, T, E> {
  Pipeline {
    pipeline: &'a Pipeline<T, E>,
    // Continuation of an enclosing pipeline, taken over once this one completes.
    tail: Option<Box<Next<'a, T, E>>>,
  },
  Empty,
}

impl<'a, T, E> Next<'a, T, E> {
  pub(crate) fn chained(pipeline: &'a Pipeline<T, E>, tail: Option<Box<Next<'a, T, E>>>) -> Self {
    Next {
      link: Link::Pipeline { pipeline, tail },
    }
  }

  /// A continuation that does nothing and reports `Completed`.
  /// Handy for exercising a single step outside any pipeline.
  pub fn empty() -> Self {
    Next { link: Link::Empty }
  }

  /// Ends the chain here without an error. The remaining steps never run.
  pub fn stop(self) -> StepResult<E> {
    event!(Level::INFO, "Step stopped the chain.");
    Ok(PipelineResult::Stopped)
  }
}

impl<'a, T, E> Next<'a, T, E>
where
  T: Clone,
  E: fmt::Display,
{
  /// Runs the rest of the chain with `value`.
  pub fn run(self, value: T) -> StepResult<E> {
    match self.link {
      Link::Pipeline { pipeline, tail } => pipeline.advance(value, tail),
      Link::Empty => Ok(PipelineResult::Completed),
    }
  }
}

impl<T, E> fmt::Debug for Next<'_, T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.link {
      Link::Pipeline { pipeline, tail } => f
        .debug_struct("Next")
        .field("cursor", &pipeline.cursor())
        .field("total", &pipeline.len())
        .field("has_tail", &tail.is_some())
        .finish(),
      Link::Empty => f.write_str("Next::Empty"),
    }
  }
}
