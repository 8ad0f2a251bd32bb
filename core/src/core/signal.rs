// stepchain/src/core/signal.rs

//! The cancellation capability a pipeline polls before each step, plus a few
//! stock signals.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A non-blocking "has this been cancelled?" query.
///
/// Pipelines poll it once per `run` invocation, before the pending step
/// starts. A step that is already executing is never interrupted.
pub trait CancellationSignal: Send + Sync {
  fn is_cancelled(&self) -> bool;
}

impl CancellationSignal for AtomicBool {
  fn is_cancelled(&self) -> bool {
    self.load(Ordering::Acquire)
  }
}

impl<S: CancellationSignal + ?Sized> CancellationSignal for Arc<S> {
  fn is_cancelled(&self) -> bool {
    (**self).is_cancelled()
  }
}

impl<S: CancellationSignal + ?Sized> CancellationSignal for Box<S> {
  fn is_cancelled(&self) -> bool {
    (**self).is_cancelled()
  }
}

impl<S: CancellationSignal + ?Sized> CancellationSignal for &S {
  fn is_cancelled(&self) -> bool {
    (**self).is_cancelled()
  }
}

#[cfg(feature = "tokio")]
impl CancellationSignal for tokio_util::sync::CancellationToken {
  fn is_cancelled(&self) -> bool {
    tokio_util::sync::CancellationToken::is_cancelled(self)
  }
}

/// A signal that is never cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Never;

impl CancellationSignal for Never {
  fn is_cancelled(&self) -> bool {
    false
  }
}

/// A cloneable cancel switch. Every clone observes the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
  pub fn new() -> Self {
    Self::default()
  }

  /// A flag that starts out cancelled.
  pub fn cancelled() -> Self {
    CancellationFlag(Arc::new(AtomicBool::new(true)))
  }

  pub fn cancel(&self) {
    self.0.store(true, Ordering::Release);
  }
}

impl CancellationSignal for CancellationFlag {
  fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::Acquire)
  }
}

/// Cancelled once a point in time has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
  // None when the deadline lies beyond what `Instant` can represent.
  at: Option<Instant>,
}

impl Deadline {
  pub fn at(at: Instant) -> Self {
    Deadline { at: Some(at) }
  }

  /// A deadline `timeout` from now. Timeouts too large to represent never expire.
  pub fn after(timeout: Duration) -> Self {
    Deadline {
      at: Instant::now().checked_add(timeout),
    }
  }

  /// The instant the deadline expires, or `None` if it never does.
  pub fn instant(&self) -> Option<Instant> {
    self.at
  }

  /// Time left before the deadline; zero once it has passed.
  pub fn remaining(&self) -> Duration {
    match self.at {
      Some(at) => at.saturating_duration_since(Instant::now()),
      None => Duration::MAX,
    }
  }
}

impl CancellationSignal for Deadline {
  fn is_cancelled(&self) -> bool {
    match self.at {
      Some(at) => Instant::now() >= at,
      None => false,
    }
  }
}

/// Cancelled as soon as any child signal is.
#[derive(Clone, Default)]
pub struct AnySignal {
  children: Vec<Arc<dyn CancellationSignal>>,
}

impl AnySignal {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, signal: impl CancellationSignal + 'static) -> Self {
    self.children.push(Arc::new(signal));
    self
  }

  pub fn len(&self) -> usize {
    self.children.len()
  }

  pub fn is_empty(&self) -> bool {
    self.children.is_empty()
  }
}

impl CancellationSignal for AnySignal {
  fn is_cancelled(&self) -> bool {
    self.children.iter().any(|s| s.is_cancelled())
  }
}

impl fmt::Debug for AnySignal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AnySignal")
      .field("children", &self.children.len())
      .field("cancelled", &self.is_cancelled())
      .finish()
  }
}

/// Adapts a closure into a signal.
pub struct FnSignal<F>(F);

pub fn signal_fn<F>(f: F) -> FnSignal<F>
where
  F: Fn() -> bool + Send + Sync,
{
  FnSignal(f)
}

impl<F> CancellationSignal for FnSignal<F>
where
  F: Fn() -> bool + Send + Sync,
{
  fn is_cancelled(&self) -> bool {
    (self.0)()
  }
}

impl<F> fmt::Debug for FnSignal<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("FnSignal")
  }
}
