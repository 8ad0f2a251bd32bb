// stepchain/src/pipeline/hooks.rs

//! Contains the fluent methods for registering the success, abort and error
//! callbacks of a `Pipeline<T, E>`.

use tracing::{event, Level};

use crate::core::hook::{HookKind, HookState};
use crate::pipeline::definition::Pipeline;

impl<T, E> Pipeline<T, E> {
  /// Registers the callback fired when the cursor reaches the end of the chain.
  ///
  /// Replaces any previously registered success callback. A callback that
  /// already fired stays fired; the new one is dropped.
  pub fn with_success_callback(mut self, cb: impl FnOnce(&T) + Send + 'static) -> Self {
    if !self.on_success.replace(Box::new(cb)) {
      event!(Level::WARN, "Success callback already fired; new callback ignored.");
    }
    self
  }

  /// Registers the callback fired when the cancellation signal is observed
  /// before a pending step.
  pub fn with_abort_callback(mut self, cb: impl FnOnce(&T) + Send + 'static) -> Self {
    if !self.on_abort.replace(Box::new(cb)) {
      event!(Level::WARN, "Abort callback already fired; new callback ignored.");
    }
    self
  }

  /// Registers the callback fired when a step returns an error. It receives the
  /// value that was handed to the failing step and the error itself.
  pub fn with_error_callback(mut self, cb: impl FnOnce(&T, &E) + Send + 'static) -> Self {
    if !self.on_error.replace(Box::new(cb)) {
      event!(Level::WARN, "Error callback already fired; new callback ignored.");
    }
    self
  }

  pub fn hook_state(&self, kind: HookKind) -> HookState {
    match kind {
      HookKind::Success => self.on_success.state(),
      HookKind::Abort => self.on_abort.state(),
      HookKind::Error => self.on_error.state(),
    }
  }

  pub(crate) fn fire_success(&self, value: &T) {
    if let Some(cb) = self.on_success.take() {
      event!(Level::TRACE, "Firing success callback.");
      cb(value);
    }
  }

  pub(crate) fn fire_abort(&self, value: &T) {
    if let Some(cb) = self.on_abort.take() {
      event!(Level::TRACE, "Firing abort callback.");
      cb(value);
    }
  }

  pub(crate) fn fire_error(&self, value: &T, err: &E) {
    if let Some(cb) = self.on_error.take() {
      event!(Level::TRACE, "Firing error callback.");
      cb(value, err);
    }
  }
}
