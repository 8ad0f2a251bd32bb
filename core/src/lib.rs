// src/lib.rs

//! stepchain: a synchronous continuation-chaining pipeline engine.
//!
//! A pipeline runs an ordered list of steps. Each step receives the current
//! value and a `Next` continuation, and decides for itself whether (and with
//! what value) to call it:
//!  - Calling `next.run(value)` runs the rest of the chain *inside* the step,
//!    so whatever the step holds stays held until the chain returns.
//!  - Returning without calling it (`next.stop()`) ends the chain quietly.
//!  - Returning an error ends the chain and propagates back to the caller.
//!  - A shared cancellation signal is polled before every pending step.
//!  - Success, abort and error callbacks fire at most once per pipeline.
//!  - A pipeline can be embedded as one step of another (`Pipeline::as_step`).
//!
//! ```
//! use stepchain::{FlowError, Never, Pipeline, PipelineResult};
//!
//! let pipeline = Pipeline::<i32, FlowError>::new(Never, Vec::new())
//!   .step(|x, next| next.run(x + 1))
//!   .step(|x, next| next.run(x + 1))
//!   .with_success_callback(|x| assert_eq!(*x, 3));
//!
//! assert_eq!(pipeline.run(1).unwrap(), PipelineResult::Completed);
//! ```

pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

// Core types that step authors interact with
pub use crate::core::control::{PipelineResult, StepResult};
pub use crate::core::hook::{Callback, ErrorCallback, HookKind, HookState};
pub use crate::core::signal::{signal_fn, AnySignal, CancellationFlag, CancellationSignal, Deadline, FnSignal, Never};
pub use crate::core::step::{step_fn, BoxedStep, Next, Step};

// The Pipeline and its composition adapter
pub use crate::pipeline::{Pipeline, PipelineStep};

pub use crate::error::{FlowError, FlowResult};
