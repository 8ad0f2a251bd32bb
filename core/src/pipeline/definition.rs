// stepchain/src/pipeline/definition.rs

//! Contains the `Pipeline<T, E>` struct definition and methods for its
//! construction and inspection.

use crate::core::hook::{Callback, ErrorCallback, Hook};
use crate::core::signal::CancellationSignal;
use crate::core::step::{BoxedStep, Next, Step};
use crate::core::StepResult;
use crate::error::{FlowError, FlowResult};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// An ordered chain of steps where every step decides whether to call the next.
///
/// `T` is the value threaded through the chain; `E` is the error type steps return.
///
/// A pipeline is single-shot: its cursor only moves forward, and each lifecycle
/// callback fires at most once for the lifetime of the instance. Only one
/// logical owner may drive `run` at a time; independent chains need separate
/// instances.
pub struct Pipeline<T, E> {
  /// Ordered list of steps for this pipeline.
  pub(crate) steps: Vec<BoxedStep<T, E>>,

  /// Number of `run` invocations, saturating at `steps.len() + 1`.
  /// The cursor is this value minus one, so zero means "not started".
  pub(crate) entered: AtomicUsize,

  pub(crate) signal: Arc<dyn CancellationSignal>,

  pub(crate) on_success: Hook<Callback<T>>,
  pub(crate) on_abort: Hook<Callback<T>>,
  pub(crate) on_error: Hook<ErrorCallback<T, E>>,
}

impl<T, E> Pipeline<T, E> {
  /// Creates a pipeline over `steps`, polling `signal` before each of them.
  ///
  /// An empty step list is valid: the first `run` goes straight to the
  /// success terminal.
  pub fn new(signal: impl CancellationSignal + 'static, steps: Vec<BoxedStep<T, E>>) -> Self {
    Self::with_shared_signal(Arc::new(signal), steps)
  }

  /// Like `new`, for a signal already shared behind an `Arc`.
  pub fn with_shared_signal(signal: Arc<dyn CancellationSignal>, steps: Vec<BoxedStep<T, E>>) -> Self {
    Self {
      steps,
      entered: AtomicUsize::new(0),
      signal,
      on_success: Hook::new(),
      on_abort: Hook::new(),
      on_error: Hook::new(),
    }
  }

  // --- Step appending (only before the first run) ---

  /// Appends a step. Fails once the pipeline has started running.
  pub fn push_step(&mut self, step: impl Step<T, E> + 'static) -> FlowResult<()> {
    if self.is_started() {
      return Err(FlowError::AlreadyStarted { total: self.steps.len() });
    }
    self.steps.push(BoxedStep::new(step));
    Ok(())
  }

  /// Fluent form of `push_step` for closures.
  ///
  /// Panics if the pipeline already started; that is a setup error.
  pub fn step<F>(self, f: F) -> Self
  where
    F: Fn(T, Next<'_, T, E>) -> StepResult<E> + Send + Sync + 'static,
  {
    self.then(f)
  }

  /// Fluent form of `push_step` for any `Step`, including a nested `PipelineStep`.
  ///
  /// Panics if the pipeline already started; that is a setup error.
  pub fn then(mut self, step: impl Step<T, E> + 'static) -> Self {
    if let Err(e) = self.push_step(step) {
      panic!("stepchain setup error: {}", e);
    }
    self
  }

  // --- Inspection ---

  /// Number of steps (`total`).
  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Index of the step most recently entered, or `None` before the first `run`.
  /// Equals `len()` once the success terminal has been reached.
  pub fn cursor(&self) -> Option<usize> {
    self.entered.load(Ordering::Acquire).checked_sub(1)
  }

  pub fn is_started(&self) -> bool {
    self.cursor().is_some()
  }

  /// True once the cursor reached `len()`; no further step will execute.
  pub fn is_terminal(&self) -> bool {
    self.cursor() == Some(self.steps.len())
  }

  pub fn signal(&self) -> &dyn CancellationSignal {
    self.signal.as_ref()
  }
}

impl<T, E> fmt::Debug for Pipeline<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("total", &self.steps.len())
      .field("cursor", &self.cursor())
      .field("cancelled", &self.signal.is_cancelled())
      .field("on_success", &self.on_success.state())
      .field("on_abort", &self.on_abort.state())
      .field("on_error", &self.on_error.state())
      .finish()
  }
}
