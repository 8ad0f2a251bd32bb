// stepchain/src/pipeline/mod.rs

//! Defines the `Pipeline<T, E>` struct, its construction, callbacks, execution
//! and composition.

pub mod compose;
pub mod definition;
pub mod execution;
pub mod hooks;

// Re-export the main Pipeline struct
pub use compose::PipelineStep;
pub use definition::Pipeline;
