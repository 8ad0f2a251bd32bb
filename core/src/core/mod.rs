pub mod control;
pub mod hook;
pub mod signal;
pub mod step;

// Re-export key types for easier access from other stepchain modules (and lib.rs)
pub use control::{PipelineResult, StepResult};
pub use hook::{Callback, ErrorCallback, HookKind, HookState};
pub use signal::{signal_fn, AnySignal, CancellationFlag, CancellationSignal, Deadline, FnSignal, Never};
pub use step::{step_fn, BoxedStep, Next, Step};
