// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use stepchain::{step_fn, BoxedStep, CancellationFlag, FlowError, Pipeline};
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test step failed: {0}")]
  Step(String),

  #[error("stepchain error: {0}")]
  Flow(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

// --- Shared execution log ---
/// Ordered record of which steps ran, shared between steps and assertions.
#[derive(Clone, Default)]
pub struct ExecLog(Arc<Mutex<Vec<String>>>);

impl ExecLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, entry: impl Into<String>) {
    self.0.lock().push(entry.into());
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().clone()
  }

  pub fn is_empty(&self) -> bool {
    self.0.lock().is_empty()
  }
}

// --- Common Step Creators ---
pub fn increment(label: &'static str, log: &ExecLog) -> BoxedStep<i32, TestError> {
  let log = log.clone();
  step_fn(move |x: i32, next| {
    log.push(label);
    tracing::debug!(target: "test_steps", step = label, value = x, "increment");
    next.run(x + 1)
  })
}

pub fn pass_through(label: &'static str, log: &ExecLog) -> BoxedStep<i32, TestError> {
  let log = log.clone();
  step_fn(move |x: i32, next| {
    log.push(label);
    next.run(x)
  })
}

pub fn failing(label: &'static str, log: &ExecLog, message: &'static str) -> BoxedStep<i32, TestError> {
  let log = log.clone();
  step_fn(move |_x: i32, _next| {
    log.push(label);
    tracing::warn!(target: "test_steps", step = label, "failing with: '{}'", message);
    Err(TestError::Step(message.to_string()))
  })
}

pub fn stopping(label: &'static str, log: &ExecLog) -> BoxedStep<i32, TestError> {
  let log = log.clone();
  step_fn(move |_x: i32, next| {
    log.push(label);
    next.stop()
  })
}

/// Runs, then trips `flag` before handing over to the next step.
pub fn cancelling(label: &'static str, log: &ExecLog, flag: &CancellationFlag) -> BoxedStep<i32, TestError> {
  let log = log.clone();
  let flag = flag.clone();
  step_fn(move |x: i32, next| {
    log.push(label);
    flag.cancel();
    next.run(x)
  })
}

// --- Callback probe ---
/// Captures every lifecycle callback invocation of a pipeline.
#[derive(Clone, Default)]
pub struct Probe {
  pub success: Arc<Mutex<Vec<i32>>>,
  pub abort: Arc<Mutex<Vec<i32>>>,
  pub error: Arc<Mutex<Vec<(i32, TestError)>>>,
}

impl Probe {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn attach(&self, pipeline: Pipeline<i32, TestError>) -> Pipeline<i32, TestError> {
    let success = self.success.clone();
    let abort = self.abort.clone();
    let error = self.error.clone();
    pipeline
      .with_success_callback(move |v| success.lock().push(*v))
      .with_abort_callback(move |v| abort.lock().push(*v))
      .with_error_callback(move |v, e| error.lock().push((*v, e.clone())))
  }

  pub fn successes(&self) -> Vec<i32> {
    self.success.lock().clone()
  }

  pub fn aborts(&self) -> Vec<i32> {
    self.abort.lock().clone()
  }

  pub fn errors(&self) -> Vec<(i32, TestError)> {
    self.error.lock().clone()
  }

  pub fn total_fired(&self) -> usize {
    self.success.lock().len() + self.abort.lock().len() + self.error.lock().len()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
