// stepchain/src/pipeline/execution.rs

//! Contains `Pipeline::run()` and the recursive state machine behind every
//! continuation.

use crate::core::control::{PipelineResult, StepResult};
use crate::core::hook::HookState;
use crate::core::step::{Next, Step};
use crate::pipeline::definition::Pipeline;
use std::fmt;
use std::sync::atomic::Ordering;
use tracing::{event, span, Level};

/// Where a single `advance` call landed.
enum Position {
  /// A step is pending at this index.
  Step(usize),
  /// The cursor just reached the end of the chain.
  Terminal,
  /// The cursor was already at the end before this call.
  Spent,
}

impl<T, E> Pipeline<T, E>
where
  T: Clone,
  E: fmt::Display,
{
  /// Executes the pipeline with `value`.
  ///
  /// Steps run by re-entering this pipeline through their `Next`, so the call
  /// stack grows by a few frames per step still pending. Very long chains can
  /// exhaust the stack; that is the price of keeping everything a step holds
  /// alive until the rest of the chain returns.
  ///
  /// Returns:
  /// - `Ok(Completed)` once every step called its continuation (fires the
  ///   success callback);
  /// - `Ok(Stopped)` when a step declined to continue;
  /// - `Ok(Aborted)` when the cancellation signal was active before a pending
  ///   step (fires the abort callback);
  /// - `Err(e)` with the first error a step returned (fires the error callback).
  ///
  /// Calling `run` again resumes after the last entered step; once the
  /// terminal has been reached it does nothing.
  pub fn run(&self, value: T) -> StepResult<E> {
    event!(
      Level::DEBUG,
      total = self.steps.len(),
      cursor = ?self.cursor(),
      value_type = %std::any::type_name::<T>(),
      "Pipeline run entered."
    );
    self.advance(value, None)
  }

  /// One turn of the state machine. `tail` is the continuation of an
  /// enclosing pipeline when this one runs as a `PipelineStep`.
  pub(crate) fn advance(&self, value: T, tail: Option<Box<Next<'_, T, E>>>) -> StepResult<E> {
    let index = match self.next_position() {
      Position::Step(index) => index,
      Position::Terminal => return self.complete(value, tail),
      Position::Spent => {
        event!(Level::DEBUG, "Pipeline already completed; no step executed.");
        return match tail {
          Some(tail) => (*tail).run(value),
          None => Ok(PipelineResult::Completed),
        };
      }
    };

    if self.signal.is_cancelled() {
      return Ok(self.abort(&value, index));
    }

    let step_span = span!(
      Level::DEBUG,
      "pipeline_step",
      step_index = index,
      total = self.steps.len()
    );
    let _step_span_guard = step_span.enter();
    event!(Level::DEBUG, "Executing step.");

    // The step consumes the value; keep a copy only if someone wants to see it on failure.
    let snapshot = if self.on_error.is_pending() {
      Some(value.clone())
    } else {
      None
    };

    match self.steps[index].call(value, Next::chained(self, tail)) {
      Ok(outcome) => {
        event!(Level::TRACE, ?outcome, "Step returned.");
        Ok(outcome)
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Step failed.");
        // After a nested success, errors from the enclosing chain belong to the enclosing pipeline.
        if self.on_success.state() == HookState::Fired {
          event!(Level::DEBUG, "Pipeline already succeeded; error callback not fired.");
        } else if let Some(value) = snapshot {
          self.fire_error(&value, &e);
        }
        Err(e)
      }
    }
  }

  fn complete(&self, value: T, tail: Option<Box<Next<'_, T, E>>>) -> StepResult<E> {
    let Some(tail) = tail else {
      event!(Level::DEBUG, "Pipeline execution completed successfully.");
      self.fire_success(&value);
      return Ok(PipelineResult::Completed);
    };

    // Handing control back to the enclosing pipeline is a step boundary of its own.
    if self.signal.is_cancelled() {
      return Ok(self.abort(&value, self.steps.len()));
    }
    event!(Level::DEBUG, "Nested pipeline completed; continuing enclosing pipeline.");
    self.fire_success(&value);
    (*tail).run(value)
  }

  fn abort(&self, value: &T, index: usize) -> PipelineResult {
    event!(
      Level::INFO,
      step_index = index,
      total = self.steps.len(),
      "Cancellation observed; pipeline aborted."
    );
    self.fire_abort(value);
    PipelineResult::Aborted
  }

  fn next_position(&self) -> Position {
    let total = self.steps.len();
    let previous = match self
      .entered
      .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| Some((n + 1).min(total + 1)))
    {
      Ok(n) | Err(n) => n,
    };
    if previous > total {
      Position::Spent
    } else if previous == total {
      Position::Terminal
    } else {
      Position::Step(previous)
    }
  }
}
